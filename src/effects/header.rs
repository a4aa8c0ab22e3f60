use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Event, Window};

use crate::config::EnhanceConfig;
use crate::dom::{add_class, find_in_document, listen_passive, remove_class, report};
use crate::error::Result;
use crate::schedule::FrameSlot;

const HIDDEN: &str = "hide-header";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMove {
    Hide,
    Show,
}

/// Decides header visibility from successive scroll offsets.
#[derive(Debug, Clone)]
pub struct HeaderTracker {
    last: f64,
    delta: f64,
    min_scroll: f64,
}

impl HeaderTracker {
    pub fn new(initial: f64, delta: f64, min_scroll: f64) -> Self {
        Self {
            last: initial,
            delta,
            min_scroll,
        }
    }

    /// Small movements inside `delta` change nothing; the offset is remembered either way.
    pub fn update(&mut self, current: f64) -> Option<HeaderMove> {
        let change = if current > self.last + self.delta && current > self.min_scroll {
            Some(HeaderMove::Hide)
        } else if current < self.last - self.delta {
            Some(HeaderMove::Show)
        } else {
            None
        };
        self.last = current;
        change
    }
}

pub fn install(window: &Window, document: &Document, config: &EnhanceConfig) -> Result<()> {
    let Some(header) = find_in_document(document, &config.selectors.header) else {
        return Ok(());
    };

    let tracker = Rc::new(RefCell::new(HeaderTracker::new(
        window.scroll_y()?,
        config.header_delta,
        config.header_min_scroll,
    )));
    let frame = FrameSlot::new(window.clone());
    let viewport = window.clone();

    listen_passive(window, "scroll", move |_: Event| {
        if frame.is_pending() {
            return;
        }
        let Ok(current) = viewport.scroll_y() else {
            return;
        };
        let header = header.clone();
        let tracker = tracker.clone();
        let scheduled = frame.request(move || {
            let result = match tracker.borrow_mut().update(current) {
                Some(HeaderMove::Hide) => add_class(&header, HIDDEN),
                Some(HeaderMove::Show) => remove_class(&header, HIDDEN),
                None => Ok(()),
            };
            report("header", result);
        });
        report("header", scheduled);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> HeaderTracker {
        HeaderTracker::new(0.0, 10.0, 120.0)
    }

    #[test]
    fn scrolling_down_past_threshold_hides() {
        let mut t = tracker();
        assert_eq!(t.update(100.0), None); // below min scroll
        assert_eq!(t.update(200.0), Some(HeaderMove::Hide));
    }

    #[test]
    fn jitter_is_ignored() {
        let mut t = HeaderTracker::new(500.0, 10.0, 120.0);
        assert_eq!(t.update(505.0), None);
        assert_eq!(t.update(498.0), None);
        assert_eq!(t.update(508.0), None);
    }

    #[test]
    fn scrolling_up_shows() {
        let mut t = HeaderTracker::new(800.0, 10.0, 120.0);
        assert_eq!(t.update(900.0), Some(HeaderMove::Hide));
        assert_eq!(t.update(850.0), Some(HeaderMove::Show));
    }

    #[test]
    fn offset_is_remembered_even_without_a_change() {
        let mut t = tracker();
        t.update(115.0);
        // 115 -> 130 is more than delta and past min scroll.
        assert_eq!(t.update(130.0), Some(HeaderMove::Hide));
    }
}
