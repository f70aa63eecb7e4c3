use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::engine::Engine;
use fusen_core::PlacementMode;

pub(crate) const OVERLAY_ID: &str = "fusen-overlay";
pub(crate) const HIGHLIGHT_CLASS: &str = "fusen-highlight";

const EXCLUDED_SELECTOR: &str =
    "#fusen-overlay, #fusen-controls, .fusen-note-container, .fusen-pin-close, .fusen-placeholder";

pub(crate) struct SelectionSession {
    overlay: Option<HtmlElement>,
    document: Document,
    _listeners: Vec<EventListener>,
}

impl SelectionSession {
    pub(crate) fn open(engine: &Rc<Engine>) -> Self {
        let document = engine.document.clone();
        let overlay = build_overlay(&document, engine.machine.borrow().mode());

        let mut listeners = Vec::with_capacity(4);
        listeners.push(EventListener::new(&document, "mouseover", |event| {
            let Some(element) = target_element(event) else {
                return;
            };
            if is_excluded(&element) {
                return;
            }
            let _ = element.class_list().add_1(HIGHLIGHT_CLASS);
        }));
        listeners.push(EventListener::new(&document, "mouseout", |event| {
            if let Some(element) = target_element(event) {
                let _ = element.class_list().remove_1(HIGHLIGHT_CLASS);
            }
        }));

        let weak = Rc::downgrade(engine);
        listeners.push(EventListener::new_with_options(
            &document,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                event.stop_propagation();
                let Some(element) = target_element(event) else {
                    return;
                };
                if is_excluded(&element) {
                    return;
                }
                finish_later(&weak, element);
            },
        ));

        let weak = Rc::downgrade(engine);
        listeners.push(EventListener::new(&document, "keydown", move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key_event.key() != "Escape" {
                return;
            }
            let weak = weak.clone();
            spawn_local(async move {
                if let Some(engine) = weak.upgrade() {
                    engine.cancel_capture();
                }
            });
        }));

        Self {
            overlay,
            document,
            _listeners: listeners,
        }
    }

    pub(crate) fn set_instructions(&self, mode: PlacementMode) {
        if let Some(overlay) = self.overlay.as_ref() {
            overlay.set_inner_html(&instructions_html(mode));
        }
    }

    pub(crate) fn teardown(self) {
        if let Some(overlay) = self.overlay.as_ref() {
            overlay.remove();
        }
        clear_highlights(&self.document);
    }
}

pub(crate) fn clear_highlights(document: &Document) {
    let Ok(marked) = document.query_selector_all(&format!(".{}", HIGHLIGHT_CLASS)) else {
        return;
    };
    for index in 0..marked.length() {
        let Some(node) = marked.get(index) else {
            continue;
        };
        if let Some(element) = node.dyn_ref::<Element>() {
            let _ = element.class_list().remove_1(HIGHLIGHT_CLASS);
        }
    }
}

fn finish_later(weak: &Weak<Engine>, element: Element) {
    let weak = weak.clone();
    spawn_local(async move {
        if let Some(engine) = weak.upgrade() {
            engine.finish_capture(element);
        }
    });
}

fn target_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn is_excluded(element: &Element) -> bool {
    matches!(element.closest(EXCLUDED_SELECTOR), Ok(Some(_)))
}

fn build_overlay(document: &Document, mode: PlacementMode) -> Option<HtmlElement> {
    let body = document.body()?;
    let overlay = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    overlay.set_id(OVERLAY_ID);
    overlay.set_inner_html(&instructions_html(mode));
    body.append_child(&overlay).ok()?;
    Some(overlay)
}

fn instructions_html(mode: PlacementMode) -> String {
    let line = match mode {
        PlacementMode::Note => {
            "🗒️ <strong>Sticky Note Mode:</strong> Click any element to copy it into a floating note"
        }
        PlacementMode::Scroll => {
            "📌 <strong>Sticky Scroll Mode:</strong> Click any element to pin it to the top while scrolling"
        }
    };
    format!(
        "<div class=\"fusen-instructions\">{}<br><small>Press ESC to exit selection mode</small></div>",
        line
    )
}
