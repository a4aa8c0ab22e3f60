// Sliding underline ("magic line") under the menu item that is hovered,
// focused, or current.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, FocusEvent, MouseEvent, Window};

use crate::config::EnhanceConfig;
use crate::dom::{
    add_class, ensure_tabindex, find, find_all, find_in_document, listen, remove_class, report,
    set_style,
};
use crate::error::Result;
use crate::schedule::TaskSlot;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    pub left: f64,
    pub width: f64,
}

/// Places the line flush with the item's left edge, relative to the menu.
pub fn line_geometry(menu_left: f64, item_left: f64, item_width: f64) -> LineGeometry {
    LineGeometry {
        left: item_left - menu_left,
        width: item_width,
    }
}

struct MagicLine {
    menu: Element,
    line: Option<Element>,
    items: Vec<Element>,
    current: RefCell<Option<Element>>,
    current_class: String,
}

impl MagicLine {
    fn move_to(&self, item: &Element) {
        let Some(line) = &self.line else {
            return;
        };
        let menu = self.menu.get_bounding_client_rect();
        let rect = item.get_bounding_client_rect();
        let geometry = line_geometry(menu.left(), rect.left(), rect.width());
        report("menu", set_style(line, "left", &format!("{}px", geometry.left)));
        report("menu", set_style(line, "width", &format!("{}px", geometry.width)));
    }

    fn return_to_current(&self) {
        if let Some(current) = self.current.borrow().as_ref() {
            self.move_to(current);
        }
    }

    fn make_current(&self, item: Element) -> Result<()> {
        for other in &self.items {
            remove_class(other, &self.current_class)?;
        }
        add_class(&item, &self.current_class)?;
        self.move_to(&item);
        *self.current.borrow_mut() = Some(item);
        Ok(())
    }
}

pub fn install(window: &Window, document: &Document, config: &EnhanceConfig) -> Result<()> {
    let selectors = &config.selectors;
    let Some(menu) = find_in_document(document, &selectors.menu) else {
        return Ok(());
    };

    let items = find_all(&menu, &selectors.menu_item);
    let current = find(&menu, &format!(".{}", selectors.current_menu_item))
        .or_else(|| items.first().cloned());
    let magic = Rc::new(MagicLine {
        line: find(&menu, &selectors.menu_line),
        menu: menu.clone(),
        items: items.clone(),
        current: RefCell::new(current),
        current_class: selectors.current_menu_item.clone(),
    });

    magic.return_to_current();

    for item in &items {
        {
            let magic = magic.clone();
            let target = item.clone();
            listen(item, "mouseenter", move |_: MouseEvent| magic.move_to(&target))?;
        }
        {
            let magic = magic.clone();
            let target = item.clone();
            listen(item, "focusin", move |_: FocusEvent| magic.move_to(&target))?;
        }
        {
            let magic = magic.clone();
            listen(item, "mouseleave", move |_: MouseEvent| magic.return_to_current())?;
        }
        {
            let magic = magic.clone();
            listen(item, "focusout", move |_: FocusEvent| magic.return_to_current())?;
        }
        if let Some(link) = find(item, "a") {
            ensure_tabindex(&link)?;
        }
    }

    {
        let magic = magic.clone();
        let debounce = config.menu_resize_debounce_ms;
        let mut pending = TaskSlot::new();
        listen(window, "resize", move |_: Event| {
            let magic = magic.clone();
            pending.schedule(debounce, move || magic.return_to_current());
        })?;
    }

    let item_selector = selectors.menu_item.clone();
    listen(&menu, "click", move |event: MouseEvent| {
        let Some(item) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&item_selector).ok().flatten())
        else {
            return;
        };
        report("menu", magic.make_current(item));
    })?;

    debug!("menu: {} items", items.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_is_relative_to_menu() {
        let g = line_geometry(100.0, 160.0, 80.0);
        assert_eq!(g, LineGeometry { left: 60.0, width: 80.0 });
    }

    #[test]
    fn first_item_sits_at_origin() {
        let g = line_geometry(24.5, 24.5, 42.0);
        assert_eq!(g.left, 0.0);
        assert_eq!(g.width, 42.0);
    }
}
