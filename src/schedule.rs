use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::Result;

/// Holds at most one pending timer. Scheduling again cancels the previous one.
#[derive(Default)]
pub struct TaskSlot {
    pending: Option<Timeout>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&mut self, millis: u32, task: F)
    where
        F: FnOnce() + 'static,
    {
        // Dropping a gloo Timeout clears it.
        self.pending = Some(Timeout::new(millis, task));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Holds at most one pending animation frame callback.
pub struct FrameSlot {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameSlot {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            handle: Rc::new(Cell::new(None)),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Runs `task` on the next repaint, replacing any frame still waiting.
    pub fn request<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + 'static,
    {
        self.cancel();

        let handle = self.handle.clone();
        let callback = Closure::once_into_js(move || {
            handle.set(None);
            task();
        });
        let id = self
            .window
            .request_animation_frame(callback.unchecked_ref())?;
        self.handle.set(Some(id));
        Ok(())
    }

    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                debug!("cancel_animation_frame({}) failed: {:?}", id, e);
            }
        }
    }
}
