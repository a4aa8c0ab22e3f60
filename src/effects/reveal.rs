use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::config::EnhanceConfig;
use crate::dom::{add_class, find_all_in_document, remove_class, report};
use crate::error::Result;

const ACTIVE: &str = "active";

/// Adds `active` to each reveal element the first time it scrolls into view.
pub fn install(window: &Window, document: &Document, config: &EnhanceConfig) -> Result<()> {
    let targets = find_all_in_document(document, &config.selectors.reveal);
    if targets.is_empty() {
        return Ok(());
    }
    if !Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false) {
        debug!("reveal: IntersectionObserver unavailable, leaving elements as they are");
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if entry.is_intersecting() {
                report("reveal", add_class(&entry.target(), ACTIVE));
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for target in &targets {
        remove_class(target, ACTIVE)?;
        observer.observe(target);
    }

    info!("reveal: observing {} elements", targets.len());
    Ok(())
}
