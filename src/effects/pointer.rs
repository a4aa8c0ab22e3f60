use web_sys::{Document, PointerEvent, Window};

use crate::dom::{listen_passive, report, set_style};
use crate::error::Result;
use crate::schedule::FrameSlot;

/// Pointer position as a percentage of the viewport extent. A zero-size
/// viewport maps everything to 0.
pub fn pointer_percent(client: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        client / extent * 100.0
    } else {
        0.0
    }
}

/// Mirrors the pointer into `--mx` / `--my` on the root element, at most once per frame.
pub fn install(window: &Window, document: &Document) -> Result<()> {
    let Some(root) = document.document_element() else {
        return Ok(());
    };

    let frame = FrameSlot::new(window.clone());
    let viewport = window.clone();
    listen_passive(window, "pointermove", move |event: PointerEvent| {
        let width = viewport.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = viewport.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let x = pointer_percent(event.client_x() as f64, width);
        let y = pointer_percent(event.client_y() as f64, height);

        let root = root.clone();
        let scheduled = frame.request(move || {
            report("pointer", set_style(&root, "--mx", &format!("{}%", x)));
            report("pointer", set_style(&root, "--my", &format!("{}%", y)));
        });
        report("pointer", scheduled);
    })
}
