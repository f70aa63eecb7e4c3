use std::cell::Cell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use gloo::net::http::Request;
use gloo::timers::callback::Interval;
use js_sys::{Date, Math};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::ErrorEvent;

use crate::engine::Engine;
use fusen_core::telemetry::{TelemetryEvent, TelemetryPayload};

pub(crate) const TELEMETRY_ENDPOINT: &str = "http://localhost:3001/api/telemetry";
pub(crate) const SCROLL_SAMPLE_MIN_GAP_MS: f64 = 100.0;
pub(crate) const HEALTH_REPORT_INTERVAL_MS: u32 = 30_000;
pub(crate) const METRICS_PRUNE_INTERVAL_MS: u32 = 300_000;

pub(crate) struct Monitoring {
    _scroll: EventListener,
    _errors: EventListener,
    _health_tick: Interval,
    _prune_tick: Interval,
}

impl Monitoring {
    pub(crate) fn install(engine: &Rc<Engine>) -> Self {
        let weak = Rc::downgrade(engine);
        let last_sample = Cell::new(0.0f64);
        let scroll = EventListener::new(&engine.window, "scroll", move |_| {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            let now = engine.now_ms();
            if now - last_sample.get() < SCROLL_SAMPLE_MIN_GAP_MS {
                return;
            }
            last_sample.set(now);
            let scroll_y = engine.window.scroll_y().unwrap_or(0.0);
            engine.metrics.borrow_mut().record_scroll(scroll_y, now);
        });

        let weak = Rc::downgrade(engine);
        let errors = EventListener::new(&engine.window, "error", move |event| {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            let Some(error) = event.dyn_ref::<ErrorEvent>() else {
                return;
            };
            engine.record_page_error(&error.message(), &error.filename());
        });

        let weak = Rc::downgrade(engine);
        let health_tick = Interval::new(HEALTH_REPORT_INTERVAL_MS, move || {
            if let Some(engine) = weak.upgrade() {
                engine.report_health();
            }
        });

        let weak = Rc::downgrade(engine);
        let prune_tick = Interval::new(METRICS_PRUNE_INTERVAL_MS, move || {
            if let Some(engine) = weak.upgrade() {
                let now = engine.now_ms();
                engine.metrics.borrow_mut().prune(now);
            }
        });

        Self {
            _scroll: scroll,
            _errors: errors,
            _health_tick: health_tick,
            _prune_tick: prune_tick,
        }
    }
}

pub(crate) fn install_unload_flush(engine: Rc<Engine>) {
    let window = engine.window.clone();
    EventListener::new(&window, "beforeunload", move |_| {
        engine.flush_telemetry();
    })
    .forget();
}

pub(crate) fn ship(engine: &Engine, events: Vec<TelemetryEvent>) {
    let payload = TelemetryPayload {
        events,
        client_id: engine.client_id.borrow().clone(),
    };
    let Ok(body) = serde_json::to_string(&payload) else {
        return;
    };
    spawn_local(async move {
        let request = match Request::post(TELEMETRY_ENDPOINT)
            .header("Content-Type", "application/json")
            .body(body)
        {
            Ok(request) => request,
            Err(err) => {
                console::warn!("telemetry: bad request", err.to_string());
                return;
            }
        };
        if let Err(err) = request.send().await {
            console::warn!("telemetry: upload failed", err.to_string());
        }
    });
}

pub(crate) fn session_client_id() -> String {
    let entropy = (Math::random() * 9.0e15) as u64;
    format!("{:x}-{:x}", Date::now() as u64, entropy)
}
