// Thin helpers over web_sys shared by the scrolly panel and the page effects.
//
// Listeners registered here live for the whole page: the closure is leaked with
// `forget()` and released when the document goes away.

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Window,
};

use crate::error::{EnhanceError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(EnhanceError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(EnhanceError::NoWindow)
}

/// First match for `selector` under `root`, `None` when absent or the selector is invalid.
pub fn find(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn find_in_document(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// All matches for `selector` under `root`, in document order.
pub fn find_all(root: &Element, selector: &str) -> Vec<Element> {
    collect(root.query_selector_all(selector).ok())
}

pub fn find_all_in_document(document: &Document, selector: &str) -> Vec<Element> {
    collect(document.query_selector_all(selector).ok())
}

fn collect(list: Option<web_sys::NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn text_of(root: &Element, selector: &str) -> Option<String> {
    find(root, selector).and_then(|el| el.text_content())
}

/// Logs a failure from inside a callback, where nobody is left to return it to.
pub fn report<T>(context: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{}: {}", context, e);
            None
        }
    }
}

pub fn add_class(element: &Element, class: &str) -> Result<()> {
    Ok(element.class_list().add_1(class)?)
}

pub fn remove_class(element: &Element, class: &str) -> Result<()> {
    Ok(element.class_list().remove_1(class)?)
}

pub fn ensure_tabindex(element: &Element) -> Result<()> {
    if !element.has_attribute("tabindex") {
        element.set_attribute("tabindex", "0")?;
    }
    Ok(())
}

pub fn set_style(element: &Element, property: &str, value: &str) -> Result<()> {
    let html = element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| EnhanceError::Js("element is not an HtmlElement".to_string()))?;
    Ok(html.style().set_property(property, value)?)
}

/// Reads `offsetWidth`, which makes the browser flush pending layout so a class
/// removed just before is observed before it is added back.
pub fn force_reflow(element: &Element) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.offset_width();
    }
}

/// Registers `handler` for `kind` events on `target`. Events that are not `E`
/// are dropped.
pub fn listen<E, F>(target: &EventTarget, kind: &str, handler: F) -> Result<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    register(target, kind, handler, false)
}

/// Same as [`listen`] but marks the listener passive, for high-frequency
/// pointer and scroll events.
pub fn listen_passive<E, F>(target: &EventTarget, kind: &str, handler: F) -> Result<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    register(target, kind, handler, true)
}

fn register<E, F>(target: &EventTarget, kind: &str, mut handler: F, passive: bool) -> Result<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::wrap(Box::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    }) as Box<dyn FnMut(Event)>);

    if passive {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
    } else {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
    }

    callback.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_passes_values_through() {
        assert_eq!(report("menu", Ok(42)), Some(42));
    }

    #[test]
    fn report_swallows_errors() {
        let failed: Result<()> = Err(EnhanceError::Js("element is not an HtmlElement".to_string()));
        assert_eq!(report("hero", failed), None);
    }
}
