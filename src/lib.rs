use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod engine;
mod messaging;
mod notes;
mod panel;
mod pdf;
mod pinner;
mod probe;
mod scheduler;
mod selection;
mod storage;
mod telemetry;

use engine::Engine;

#[wasm_bindgen(start)]
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if document.body().is_some() {
        init(window, document);
        return;
    }
    EventListener::once(&document.clone(), "DOMContentLoaded", move |_| {
        init(window, document);
    })
    .forget();
}

fn init(window: Window, document: Document) {
    let engine = Engine::new(window, document);
    panel::inject_styles(&engine.document);
    *engine.panel.borrow_mut() = panel::Panel::install(&engine);
    if engine.is_pdf_viewer {
        console::log!("fusen: pdf viewer detected, pin mode tuned for documents");
        engine.with_panel(|panel| panel.mark_pdf());
    }
    *engine.scheduler.borrow_mut() = Some(scheduler::RepositionScheduler::install(&engine));
    *engine.monitoring.borrow_mut() = Some(telemetry::Monitoring::install(&engine));
    if !messaging::install(engine.clone()) {
        console::log!("fusen: host messaging unavailable, panel-only session");
    }
    telemetry::install_unload_flush(engine.clone());
    storage::log_saved_counts();
    storage::adopt_client_id(&engine);
    console::log!("fusen: engine ready");
}
