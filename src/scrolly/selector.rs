use super::model::SessionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectOptions {
    pub set_current: bool,
    pub scroll_into_view: bool,
}

impl SelectOptions {
    /// Click / Enter / Space on a step.
    pub const ACTIVATE: Self = Self {
        set_current: true,
        scroll_into_view: false,
    };

    /// Prev / next buttons and arrow keys.
    pub const STEP: Self = Self {
        set_current: true,
        scroll_into_view: true,
    };

    /// Show a record without moving the cursor.
    pub const PREVIEW: Self = Self {
        set_current: false,
        scroll_into_view: false,
    };
}

/// Result of a [`StepSelector::select`] call: which step to render and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub options: SelectOptions,
}

/// Keys the panel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKey {
    Previous,
    Next,
    Activate,
}

impl StepKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(StepKey::Previous),
            "ArrowRight" => Some(StepKey::Next),
            "Enter" | " " => Some(StepKey::Activate),
            _ => None,
        }
    }
}

/// Selection cursor over a fixed list of session records.
#[derive(Debug, Clone)]
pub struct StepSelector {
    records: Vec<SessionRecord>,
    current: Option<usize>,
}

impl StepSelector {
    pub fn new(records: Vec<SessionRecord>) -> Self {
        Self {
            records,
            current: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<&SessionRecord> {
        self.records.get(index)
    }

    /// The cursor as the page sees it: `-1` until something is selected.
    pub fn current_index(&self) -> isize {
        self.current.map_or(-1, |i| i as isize)
    }

    /// Saturates `index` into the valid range. `None` only when there are no records.
    pub fn clamp(&self, index: isize) -> Option<usize> {
        let last = self.records.len().checked_sub(1)?;
        Some(index.clamp(0, last as isize) as usize)
    }

    pub fn select(&mut self, index: isize, options: SelectOptions) -> Option<Selection> {
        let index = self.clamp(index)?;
        if options.set_current {
            self.current = Some(index);
        }
        Some(Selection { index, options })
    }

    pub fn next(&mut self) -> Option<Selection> {
        self.select(self.current_index() + 1, SelectOptions::STEP)
    }

    pub fn previous(&mut self) -> Option<Selection> {
        self.select(self.current_index() - 1, SelectOptions::STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(titles: &[&str]) -> StepSelector {
        StepSelector::new(
            titles
                .iter()
                .map(|t| SessionRecord::new(*t, "", "meta"))
                .collect(),
        )
    }

    #[test]
    fn starts_with_nothing_selected() {
        let selector = selector(&["Intro", "Build", "Deploy"]);
        assert_eq!(selector.current_index(), -1);
    }

    #[test]
    fn select_in_range_moves_cursor() {
        let mut selector = selector(&["Intro", "Build", "Deploy"]);
        for i in 0..3 {
            let selection = selector.select(i, SelectOptions::ACTIVATE).unwrap();
            assert_eq!(selection.index, i as usize);
            assert_eq!(selector.current_index(), i);
        }
    }

    #[test]
    fn out_of_range_saturates() {
        let mut selector = selector(&["Intro", "Build", "Deploy"]);

        let low = selector.select(-5, SelectOptions::ACTIVATE).unwrap();
        assert_eq!(low.index, 0);
        assert_eq!(selector.current_index(), 0);

        let high = selector.select(3 + 5, SelectOptions::ACTIVATE).unwrap();
        assert_eq!(high.index, 2);
        assert_eq!(selector.current_index(), 2);
    }

    #[test]
    fn preview_leaves_cursor_alone() {
        let mut selector = selector(&["Intro", "Build", "Deploy"]);
        selector.select(1, SelectOptions::ACTIVATE);

        let selection = selector.select(2, SelectOptions::PREVIEW).unwrap();
        assert_eq!(selection.index, 2);
        assert_eq!(selector.current_index(), 1);
    }

    #[test]
    fn next_walks_forward_and_stops_at_the_end() {
        let mut selector = selector(&["Intro", "Build", "Deploy"]);

        let visited: Vec<usize> = (0..4).map(|_| selector.next().unwrap().index).collect();

        assert_eq!(visited, vec![0, 1, 2, 2]);
        assert_eq!(selector.current_index(), 2);
    }

    #[test]
    fn previous_from_nothing_selects_first() {
        let mut selector = selector(&["Intro", "Build", "Deploy"]);
        let selection = selector.previous().unwrap();
        assert_eq!(selection.index, 0);
        assert_eq!(selection.options, SelectOptions::STEP);
    }

    #[test]
    fn empty_selector_ignores_everything() {
        let mut selector = selector(&[]);
        assert!(selector.is_empty());
        assert!(selector.select(0, SelectOptions::ACTIVATE).is_none());
        assert!(selector.next().is_none());
        assert_eq!(selector.current_index(), -1);
    }

    #[test]
    fn key_mapping() {
        assert_eq!(StepKey::from_key("ArrowLeft"), Some(StepKey::Previous));
        assert_eq!(StepKey::from_key("ArrowRight"), Some(StepKey::Next));
        assert_eq!(StepKey::from_key("Enter"), Some(StepKey::Activate));
        assert_eq!(StepKey::from_key(" "), Some(StepKey::Activate));
        assert_eq!(StepKey::from_key("ArrowUp"), None);
        assert_eq!(StepKey::from_key("a"), None);
    }
}
