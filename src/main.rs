use log::{info, warn};
use web_sys::{Document, Event, Window};

mod config;
mod dom;
mod error;
mod schedule;
mod scrolly {
    pub mod model;
    pub mod panel;
    pub mod selector;
    pub mod view;
    pub mod wire;
}
mod effects {
    pub mod header;
    pub mod hero;
    pub mod menu;
    pub mod pointer;
    pub mod reveal;
}

use config::EnhanceConfig;
use error::Result;

/// Starts every page feature. A feature that fails is logged and skipped so the
/// rest of the page still gets enhanced.
fn enhance(window: &Window, document: &Document) {
    let config = EnhanceConfig::load(document);

    run("reveal", effects::reveal::install(window, document, &config));
    run("hero", effects::hero::install(document, &config));
    run("pointer", effects::pointer::install(window, document));
    run("header", effects::header::install(window, document, &config));
    run("menu", effects::menu::install(window, document, &config));
    run("scrolly", scrolly::wire::install(document, &config));

    info!("Page enhancements ready");
}

fn run(feature: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!("{} disabled: {}", feature, e);
    }
}

fn start() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        dom::listen(&target, "DOMContentLoaded", move |_: Event| {
            enhance(&window, &document);
        })?;
    } else {
        enhance(&window, &document);
    }
    Ok(())
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if let Err(e) = console_log::init_with_level(config::log_level()) {
        web_sys::console::error_1(&format!("error initializing log: {}", e).into());
    }

    info!("Starting page enhancements");
    if let Err(e) = start() {
        warn!("Page enhancements not started: {}", e);
    }
}
