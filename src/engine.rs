use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use js_sys::Date;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::notes::{self, NoteArtifact};
use crate::panel::Panel;
use crate::pdf;
use crate::pinner::{self, PinArtifact};
use crate::probe;
use crate::scheduler::RepositionScheduler;
use crate::selection::{self, SelectionSession};
use crate::storage;
use crate::telemetry::{self, Monitoring};
use fusen_core::health::HealthMonitor;
use fusen_core::metrics::ScrollMetrics;
use fusen_core::telemetry::{TelemetryBatch, TelemetryEvent, TelemetryKind};
use fusen_core::{
    slot_top, ArtifactLedger, PlacementMode, SelectionMachine, StatsSnapshot, Transition,
};

pub(crate) struct Engine {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) ledger: RefCell<ArtifactLedger<PinArtifact, NoteArtifact>>,
    pub(crate) machine: RefCell<SelectionMachine>,
    pub(crate) session: RefCell<Option<SelectionSession>>,
    pub(crate) panel: RefCell<Option<Panel>>,
    pub(crate) scheduler: RefCell<Option<RepositionScheduler>>,
    pub(crate) monitoring: RefCell<Option<Monitoring>>,
    pub(crate) metrics: RefCell<ScrollMetrics>,
    pub(crate) health: RefCell<HealthMonitor>,
    pub(crate) telemetry: RefCell<TelemetryBatch>,
    pub(crate) client_id: RefCell<String>,
    pub(crate) is_pdf_viewer: bool,
}

impl Engine {
    pub(crate) fn new(window: Window, document: Document) -> Rc<Self> {
        let is_pdf_viewer = pdf::detect_pdf_viewer(&window, &document);
        Rc::new(Self {
            window,
            document,
            ledger: RefCell::new(ArtifactLedger::new()),
            machine: RefCell::new(SelectionMachine::new()),
            session: RefCell::new(None),
            panel: RefCell::new(None),
            scheduler: RefCell::new(None),
            monitoring: RefCell::new(None),
            metrics: RefCell::new(ScrollMetrics::new()),
            health: RefCell::new(HealthMonitor::new(Date::now())),
            telemetry: RefCell::new(TelemetryBatch::new()),
            client_id: RefCell::new(telemetry::session_client_id()),
            is_pdf_viewer,
        })
    }

    pub(crate) fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or_else(Date::now)
    }

    pub(crate) fn pin_count(&self) -> usize {
        self.ledger.borrow().pin_count()
    }

    pub(crate) fn with_panel(&self, update: impl FnOnce(&Panel)) {
        if let Some(panel) = self.panel.borrow().as_ref() {
            update(panel);
        }
    }

    pub(crate) fn toggle_selection(self: &Rc<Self>) {
        let transition = self.machine.borrow_mut().toggle();
        match transition {
            Transition::Entered => {
                *self.session.borrow_mut() = Some(SelectionSession::open(self));
                self.with_panel(|panel| {
                    panel.set_selection_active(true);
                    panel.expand();
                });
            }
            Transition::Exited => {
                self.close_session();
                self.with_panel(|panel| panel.set_selection_active(false));
            }
            Transition::Unchanged => {}
        }
    }

    pub(crate) fn cancel_capture(self: &Rc<Self>) {
        if self.machine.borrow_mut().exit() == Transition::Exited {
            self.close_session();
            self.with_panel(|panel| panel.set_selection_active(false));
        }
    }

    pub(crate) fn finish_capture(self: &Rc<Self>, element: Element) {
        let Some(mode) = self.machine.borrow_mut().complete_capture() else {
            return;
        };
        self.close_session();
        self.with_panel(|panel| panel.set_selection_active(false));
        let start = self.now_ms();
        let placed = match mode {
            PlacementMode::Note => notes::create_note(self, element),
            PlacementMode::Scroll => match element.dyn_into::<HtmlElement>() {
                Ok(target) => pinner::pin(self, target),
                Err(_) => {
                    console::warn!("engine: target cannot be pinned, not an html element");
                    false
                }
            },
        };
        let now = self.now_ms();
        self.metrics
            .borrow_mut()
            .record_handler_duration(now - start, now);
        if placed {
            let kind = match mode {
                PlacementMode::Note => TelemetryKind::NotePlaced,
                PlacementMode::Scroll => TelemetryKind::PinPlaced,
            };
            self.metrics.borrow_mut().record_activation();
            self.record_event(kind, now - start);
        }
    }

    pub(crate) fn close_session(&self) {
        if let Some(session) = self.session.borrow_mut().take() {
            session.teardown();
        }
        selection::clear_highlights(&self.document);
    }

    pub(crate) fn set_mode(&self, mode: PlacementMode) {
        self.machine.borrow_mut().set_mode(mode);
        self.with_panel(|panel| panel.set_mode(mode));
        if let Some(session) = self.session.borrow().as_ref() {
            session.set_instructions(mode);
        }
    }

    pub(crate) fn clear_all(self: &Rc<Self>) {
        let pin_ids = self.ledger.borrow().pin_ids();
        for id in pin_ids {
            pinner::unpin(self, id);
        }
        let note_ids = self.ledger.borrow().note_ids();
        for id in note_ids {
            notes::remove_note(self, id);
        }
    }

    pub(crate) fn stats(&self) -> StatsSnapshot {
        let ledger = self.ledger.borrow();
        let machine = self.machine.borrow();
        StatsSnapshot {
            sticky_count: ledger.note_count(),
            sticky_scroll_count: ledger.pin_count(),
            total_count: ledger.total(),
            selection_mode: machine.is_capturing(),
            current_mode: machine.mode(),
            is_pdf_viewer: self.is_pdf_viewer,
        }
    }

    pub(crate) fn restack(&self) {
        let ledger = self.ledger.borrow();
        if ledger.pin_count() == 0 {
            return;
        }
        let base = probe::compute_base_offset(&self.window, &self.document);
        for (index, (_, record)) in ledger.pins().enumerate() {
            record.set_top(slot_top(base, index));
        }
    }

    pub(crate) fn restack_timed(&self) {
        let start = self.now_ms();
        self.restack();
        let now = self.now_ms();
        self.metrics
            .borrow_mut()
            .record_handler_duration(now - start, now);
    }

    pub(crate) fn persist_counts(&self) {
        let ledger = self.ledger.borrow();
        storage::persist_counts(ledger.note_count(), ledger.pin_count());
    }

    pub(crate) fn record_event(&self, kind: TelemetryKind, duration_ms: f64) {
        let hostname = self.window.location().hostname().unwrap_or_default();
        let event = TelemetryEvent {
            kind,
            hostname,
            duration_ms,
            timestamp_ms: Date::now(),
        };
        let full = self.telemetry.borrow_mut().push(event);
        if let Some(batch) = full {
            telemetry::ship(self, batch);
        }
    }

    pub(crate) fn flush_telemetry(&self) {
        let events = self.telemetry.borrow_mut().drain();
        if events.is_empty() {
            return;
        }
        telemetry::ship(self, events);
    }

    pub(crate) fn record_page_error(&self, message: &str, source: &str) {
        self.health
            .borrow_mut()
            .record_error(message, source, Date::now());
    }

    pub(crate) fn report_health(&self) {
        let status = self.health.borrow().status(Date::now());
        storage::persist_health(&status);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) fn test_engine() -> Rc<Engine> {
    let window = web_sys::window().expect("test window");
    let document = window.document().expect("test document");
    Engine::new(window, document)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::notes::NOTED_MARK_CLASS;
    use crate::pinner::{PIN_MARKER_CLASS, PIN_ROW_CLASS};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mounted_sources(document: &Document, count: usize) -> Vec<HtmlElement> {
        (0..count)
            .map(|n| {
                let element: HtmlElement = document
                    .create_element("div")
                    .unwrap()
                    .dyn_into()
                    .unwrap();
                element.set_text_content(Some(&format!("source {n}")));
                document.body().unwrap().append_child(&element).unwrap();
                element
            })
            .collect()
    }

    #[wasm_bindgen_test]
    fn capture_click_places_one_pin_and_returns_to_idle() {
        let engine = test_engine();
        engine.machine.borrow_mut().set_mode(PlacementMode::Scroll);
        let sources = mounted_sources(&engine.document, 2);

        engine.toggle_selection();
        assert!(engine.machine.borrow().is_capturing());
        engine.finish_capture(sources[0].clone().into());

        assert!(!engine.machine.borrow().is_capturing());
        assert_eq!(engine.ledger.borrow().pin_count(), 1);

        engine.finish_capture(sources[1].clone().into());
        assert_eq!(engine.ledger.borrow().pin_count(), 1);

        engine.clear_all();
        for element in &sources {
            element.remove();
        }
    }

    #[wasm_bindgen_test]
    fn clear_all_empties_both_registries_and_unmarks_sources() {
        let engine = test_engine();
        let sources = mounted_sources(&engine.document, 5);
        for element in &sources[..2] {
            assert!(crate::notes::create_note(&engine, element.clone().into()));
        }
        for element in &sources[2..] {
            assert!(crate::pinner::pin(&engine, element.clone()));
        }
        assert_eq!(engine.stats().total_count, 5);

        engine.clear_all();

        let stats = engine.stats();
        assert_eq!(stats.sticky_count, 0);
        assert_eq!(stats.sticky_scroll_count, 0);
        assert_eq!(stats.total_count, 0);
        for element in &sources {
            assert!(!element.class_list().contains(NOTED_MARK_CLASS));
            assert!(!element.class_list().contains(PIN_MARKER_CLASS));
            assert!(!element.class_list().contains(PIN_ROW_CLASS));
            element.remove();
        }
    }

    #[wasm_bindgen_test]
    fn stats_report_the_live_mode_and_capture_state() {
        let engine = test_engine();
        engine.set_mode(PlacementMode::Note);
        let stats = engine.stats();
        assert_eq!(stats.current_mode, PlacementMode::Note);
        assert!(!stats.selection_mode);

        engine.toggle_selection();
        assert!(engine.stats().selection_mode);
        engine.toggle_selection();
        assert!(!engine.stats().selection_mode);
    }
}
