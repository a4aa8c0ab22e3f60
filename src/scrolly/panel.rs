use log::debug;
#[cfg(test)]
use mockall::automock;

use super::model::SessionRecord;
use super::selector::{SelectOptions, StepKey, StepSelector};
use crate::error::Result;

/// Rendering side of the panel. The DOM implementation lives in `view`.
#[cfg_attr(test, automock)]
pub trait StepView {
    /// Puts the label area into its "nothing selected" state.
    fn show_prompt(&mut self, prompt: &str) -> Result<()>;
    fn hide_card(&mut self) -> Result<()>;
    /// Makes `index` the only active step.
    fn mark_active(&mut self, index: usize) -> Result<()>;
    fn show_label(&mut self, title: &str) -> Result<()>;
    fn show_card(&mut self, record: &SessionRecord) -> Result<()>;
    fn scroll_to(&mut self, index: usize) -> Result<()>;
}

pub struct ScrollyPanel<V> {
    selector: StepSelector,
    view: V,
}

impl<V: StepView> ScrollyPanel<V> {
    pub fn new(selector: StepSelector, view: V) -> Self {
        Self { selector, view }
    }

    pub fn selector(&self) -> &StepSelector {
        &self.selector
    }

    pub fn current_index(&self) -> isize {
        self.selector.current_index()
    }

    pub fn reset(&mut self, prompt: &str) -> Result<()> {
        self.view.show_prompt(prompt)?;
        self.view.hide_card()
    }

    /// Selects `index` (clamped) and renders it. Returns the index actually shown.
    pub fn select(&mut self, index: isize, options: SelectOptions) -> Result<Option<usize>> {
        let selection = self.selector.select(index, options);
        self.render(selection.map(|s| (s.index, s.options)))
    }

    pub fn next(&mut self) -> Result<Option<usize>> {
        let selection = self.selector.next();
        self.render(selection.map(|s| (s.index, s.options)))
    }

    pub fn previous(&mut self) -> Result<Option<usize>> {
        let selection = self.selector.previous();
        self.render(selection.map(|s| (s.index, s.options)))
    }

    pub fn activate(&mut self, index: usize) -> Result<Option<usize>> {
        self.select(index as isize, SelectOptions::ACTIVATE)
    }

    /// Panel-level keyboard navigation. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> Result<bool> {
        match StepKey::from_key(key) {
            Some(StepKey::Previous) => self.previous().map(|_| true),
            Some(StepKey::Next) => self.next().map(|_| true),
            Some(StepKey::Activate) | None => Ok(false),
        }
    }

    fn render(&mut self, selection: Option<(usize, SelectOptions)>) -> Result<Option<usize>> {
        let Some((index, options)) = selection else {
            return Ok(None);
        };
        let Some(record) = self.selector.record(index) else {
            return Ok(None);
        };

        debug!(
            "scrolly: show index={} current={} title={:?}",
            index,
            self.selector.current_index(),
            record.title
        );

        if options.set_current {
            self.view.mark_active(index)?;
        }
        self.view.show_label(&record.title)?;
        self.view.show_card(record)?;
        if options.scroll_into_view {
            self.view.scroll_to(index)?;
        }
        Ok(Some(index))
    }
}
