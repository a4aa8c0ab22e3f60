use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window};

use super::model::SessionRecord;
use super::panel::StepView;
use crate::dom::{add_class, force_reflow, remove_class, report};
use crate::error::{EnhanceError, Result};
use crate::schedule::{FrameSlot, TaskSlot};

const ACTIVE: &str = "active";
const POP: &str = "pop";
const VISIBLE: &str = "visible";
const PROMPT: &str = "prompt";

/// The detail card. Its content is only written when all three slots exist.
pub struct SessionCard {
    pub root: Element,
    pub slots: Option<CardSlots>,
}

pub struct CardSlots {
    pub title: Element,
    pub meta: Element,
    pub description: Element,
}

/// Renders panel state into the page's step list, label area and session card.
pub struct DomStepView {
    steps: Vec<Element>,
    label: Option<Element>,
    card: Option<SessionCard>,
    pop_ms: u32,
    pop_task: TaskSlot,
    popped: Rc<RefCell<Option<Element>>>,
    label_frame: FrameSlot,
    card_frame: FrameSlot,
}

impl DomStepView {
    pub fn new(
        window: &Window,
        steps: Vec<Element>,
        label: Option<Element>,
        card: Option<SessionCard>,
        pop_ms: u32,
    ) -> Self {
        Self {
            steps,
            label,
            card,
            pop_ms,
            pop_task: TaskSlot::new(),
            popped: Rc::new(RefCell::new(None)),
            label_frame: FrameSlot::new(window.clone()),
            card_frame: FrameSlot::new(window.clone()),
        }
    }

    fn step(&self, index: usize) -> Result<&Element> {
        self.steps
            .get(index)
            .ok_or_else(|| EnhanceError::missing(&format!("step #{}", index)))
    }

    /// Restarts the `pop` animation on `step`, clearing any earlier one right away.
    fn pop(&mut self, step: Element) -> Result<()> {
        self.pop_task.cancel();
        if let Some(stale) = self.popped.borrow_mut().take() {
            remove_class(&stale, POP)?;
        }

        add_class(&step, POP)?;
        *self.popped.borrow_mut() = Some(step);

        let popped = self.popped.clone();
        self.pop_task.schedule(self.pop_ms, move || {
            if let Some(step) = popped.borrow_mut().take() {
                report("scrolly", remove_class(&step, POP));
            }
        });
        Ok(())
    }

    /// Drops `visible`, flushes layout, and brings `visible` back on the next
    /// frame so the entrance transition replays even for the same content.
    fn reveal(frame: &FrameSlot, element: &Element) -> Result<()> {
        remove_class(element, VISIBLE)?;
        force_reflow(element);
        let element = element.clone();
        frame.request(move || {
            report("scrolly", add_class(&element, VISIBLE));
        })
    }
}

impl StepView for DomStepView {
    fn show_prompt(&mut self, prompt: &str) -> Result<()> {
        if let Some(label) = &self.label {
            label.set_text_content(Some(prompt));
            add_class(label, VISIBLE)?;
            add_class(label, PROMPT)?;
        }
        Ok(())
    }

    fn hide_card(&mut self) -> Result<()> {
        if let Some(card) = &self.card {
            remove_class(&card.root, VISIBLE)?;
            card.root.set_attribute("aria-hidden", "true")?;
        }
        Ok(())
    }

    fn mark_active(&mut self, index: usize) -> Result<()> {
        for step in &self.steps {
            remove_class(step, ACTIVE)?;
        }
        let step = self.step(index)?.clone();
        add_class(&step, ACTIVE)?;
        self.pop(step)
    }

    fn show_label(&mut self, title: &str) -> Result<()> {
        let Some(label) = &self.label else {
            return Ok(());
        };
        remove_class(label, PROMPT)?;
        label.set_text_content(Some(title));
        Self::reveal(&self.label_frame, label)
    }

    fn show_card(&mut self, record: &SessionRecord) -> Result<()> {
        let Some((card, slots)) = self
            .card
            .as_ref()
            .and_then(|card| card.slots.as_ref().map(|slots| (card, slots)))
        else {
            return Ok(());
        };
        slots.title.set_text_content(Some(&record.title));
        slots.meta.set_text_content(Some(&record.meta));
        slots.description.set_text_content(Some(&record.description));
        card.root.set_attribute("aria-hidden", "false")?;
        Self::reveal(&self.card_frame, &card.root)
    }

    fn scroll_to(&mut self, index: usize) -> Result<()> {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        self.step(index)?
            .scroll_into_view_with_scroll_into_view_options(&options);
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    use super::*;
    use crate::dom;

    wasm_bindgen_test_configure!(run_in_browser);

    const POP_MS: u32 = 40;

    fn div() -> Element {
        dom::document().unwrap().create_element("div").unwrap()
    }

    fn view(steps: usize, label: Option<Element>) -> (DomStepView, Vec<Element>) {
        let steps: Vec<Element> = (0..steps).map(|_| div()).collect();
        let view = DomStepView::new(
            &dom::window().unwrap(),
            steps.clone(),
            label,
            None,
            POP_MS,
        );
        (view, steps)
    }

    fn has(element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    #[wasm_bindgen_test]
    fn only_one_step_is_active() {
        let (mut view, steps) = view(3, None);

        view.mark_active(0).unwrap();
        view.mark_active(2).unwrap();

        assert!(!has(&steps[0], ACTIVE));
        assert!(!has(&steps[1], ACTIVE));
        assert!(has(&steps[2], ACTIVE));
    }

    #[wasm_bindgen_test]
    async fn new_selection_replaces_pending_pop() {
        let (mut view, steps) = view(2, None);

        view.mark_active(0).unwrap();
        assert!(has(&steps[0], POP));

        view.mark_active(1).unwrap();
        assert!(!has(&steps[0], POP));
        assert!(has(&steps[1], POP));

        TimeoutFuture::new(POP_MS * 3).await;
        assert!(!has(&steps[0], POP));
        assert!(!has(&steps[1], POP));
    }

    #[wasm_bindgen_test]
    async fn reselecting_replays_the_reveal() {
        let label = div();
        let (mut view, _) = view(1, Some(label.clone()));

        view.show_prompt("Pick one").unwrap();
        assert!(has(&label, VISIBLE));
        assert!(has(&label, PROMPT));

        view.show_label("Intro").unwrap();
        assert!(!has(&label, VISIBLE));
        assert!(!has(&label, PROMPT));
        assert_eq!(label.text_content().as_deref(), Some("Intro"));

        TimeoutFuture::new(100).await;
        assert!(has(&label, VISIBLE));

        view.show_label("Intro").unwrap();
        assert!(!has(&label, VISIBLE));

        TimeoutFuture::new(100).await;
        assert!(has(&label, VISIBLE));
    }
}
