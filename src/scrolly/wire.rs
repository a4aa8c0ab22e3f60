use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use web_sys::{Document, Element, KeyboardEvent, MouseEvent};

use super::model::SessionRecord;
use super::panel::ScrollyPanel;
use super::selector::{StepKey, StepSelector};
use super::view::{CardSlots, DomStepView, SessionCard};
use crate::config::{EnhanceConfig, Selectors};
use crate::dom::{
    self, ensure_tabindex, find, find_all, find_in_document, listen, report, set_style, text_of,
};
use crate::error::Result;

type SharedPanel = Rc<RefCell<ScrollyPanel<DomStepView>>>;

/// Hooks the scrollytelling panel up to the page. No-op when the page has no panel.
pub fn install(document: &Document, config: &EnhanceConfig) -> Result<()> {
    let selectors = &config.selectors;
    let Some(root) = find_in_document(document, &selectors.panel) else {
        debug!("scrolly: no panel on this page");
        return Ok(());
    };

    let steps = find_all(&root, &selectors.step);
    let selector = StepSelector::new(read_records(&steps, config));
    if selector.is_empty() {
        debug!("scrolly: panel has no steps");
    }
    let view = DomStepView::new(
        &dom::window()?,
        steps.clone(),
        find(&root, &selectors.label),
        find_card(&root, selectors),
        config.pop_ms,
    );

    let panel: SharedPanel = Rc::new(RefCell::new(ScrollyPanel::new(selector, view)));
    panel.borrow_mut().reset(&config.prompt)?;

    if let Some(prev) = find(&root, &selectors.prev) {
        let panel = panel.clone();
        listen(&prev, "click", move |_: MouseEvent| {
            report("scrolly", panel.borrow_mut().previous());
        })?;
    }
    if let Some(next) = find(&root, &selectors.next) {
        let panel = panel.clone();
        listen(&next, "click", move |_: MouseEvent| {
            report("scrolly", panel.borrow_mut().next());
        })?;
    }

    {
        let panel = panel.clone();
        listen(&root, "keydown", move |event: KeyboardEvent| {
            if !matches!(
                StepKey::from_key(&event.key()),
                Some(StepKey::Previous | StepKey::Next)
            ) {
                return;
            }
            event.prevent_default();
            report("scrolly", panel.borrow_mut().handle_key(&event.key()));
        })?;
    }

    for (i, step) in steps.iter().enumerate() {
        ensure_tabindex(step)?;
        set_style(step, "cursor", "pointer")?;

        let on_click = panel.clone();
        listen(step, "click", move |_: MouseEvent| {
            report("scrolly", on_click.borrow_mut().activate(i));
        })?;

        let on_key = panel.clone();
        listen(step, "keydown", move |event: KeyboardEvent| {
            if StepKey::from_key(&event.key()) == Some(StepKey::Activate) {
                event.prevent_default();
                report("scrolly", on_key.borrow_mut().activate(i));
            }
        })?;
    }

    info!("scrolly: {} steps ready", panel.borrow().selector().len());
    Ok(())
}

fn read_records(steps: &[Element], config: &EnhanceConfig) -> Vec<SessionRecord> {
    steps
        .iter()
        .map(|step| {
            SessionRecord::from_markup(
                text_of(step, "h3"),
                text_of(step, "p"),
                step.get_attribute("data-meta"),
                config,
            )
        })
        .collect()
}

fn find_card(root: &Element, selectors: &Selectors) -> Option<SessionCard> {
    let card = find(root, &selectors.card)?;
    let slots = find_slots(&card, selectors);
    Some(SessionCard { root: card, slots })
}

fn find_slots(card: &Element, selectors: &Selectors) -> Option<CardSlots> {
    Some(CardSlots {
        title: find(card, &selectors.card_title)?,
        meta: find(card, &selectors.card_meta)?,
        description: find(card, &selectors.card_desc)?,
    })
}
