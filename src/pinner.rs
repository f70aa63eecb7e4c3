use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::engine::Engine;
use crate::probe;
use fusen_core::style::SNAPSHOT_PROPS;
use fusen_core::{pinned_declarations, slot_top, PinId, StyleSnapshot};

pub(crate) const PIN_MARKER_CLASS: &str = "fusen-pinned";
pub(crate) const PIN_ROW_CLASS: &str = "fusen-pin-row";
pub(crate) const PIN_ID_ATTR: &str = "data-fusen-id";
pub(crate) const CLOSE_CLASS: &str = "fusen-pin-close";
pub(crate) const PLACEHOLDER_CLASS: &str = "fusen-placeholder";

const CLOSE_CSS: &str = "position: absolute; top: 5px; right: 5px; width: 20px; height: 20px; \
    background: #ff4444; color: white; border: none; border-radius: 50%; cursor: pointer; \
    font-size: 12px; z-index: 9999; display: flex; align-items: center; justify-content: center;";

pub(crate) struct PinArtifact {
    pub(crate) element: HtmlElement,
    pub(crate) placeholder: HtmlElement,
    pub(crate) close_control: HtmlElement,
    pub(crate) saved: StyleSnapshot,
    pub(crate) close_listener: Option<EventListener>,
}

impl PinArtifact {
    pub(crate) fn set_top(&self, top: f64) {
        let _ = self
            .element
            .style()
            .set_property("top", &format!("{}px", top));
    }
}

pub(crate) fn pin(engine: &Rc<Engine>, element: HtmlElement) -> bool {
    if element.class_list().contains(PIN_MARKER_CLASS) || element.has_attribute(PIN_ID_ATTR) {
        console::log!("pinner: element already pinned, skipping");
        return false;
    }
    let Some(parent) = element.parent_node() else {
        console::warn!("pinner: target is detached from the tree");
        return false;
    };
    let Some(placeholder) = build_placeholder(&engine.document, &element) else {
        return false;
    };
    let Some(close_control) = build_close_control(&engine.document) else {
        return false;
    };

    let saved = snapshot_styles(&element);
    if parent.insert_before(&placeholder, Some(&element)).is_err() {
        console::warn!("pinner: placeholder insert failed");
        return false;
    }

    let base = probe::compute_base_offset(&engine.window, &engine.document);
    let index = engine.ledger.borrow().pin_count();
    let style = element.style();
    for (prop, value) in pinned_declarations(slot_top(base, index), &saved) {
        let _ = style.set_property(prop, &value);
    }
    let classes = element.class_list();
    let _ = classes.add_1(PIN_MARKER_CLASS);
    let _ = classes.add_1(PIN_ROW_CLASS);
    let _ = element.append_child(&close_control);

    let record = PinArtifact {
        element: element.clone(),
        placeholder,
        close_control: close_control.clone(),
        saved,
        close_listener: None,
    };
    let id = engine.ledger.borrow_mut().add_pin(record);
    let _ = element.set_attribute(PIN_ID_ATTR, &id.to_string());

    let weak = Rc::downgrade(engine);
    let listener = EventListener::new_with_options(
        &close_control,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            event.stop_propagation();
            let weak = weak.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(engine) = weak.upgrade() {
                    unpin(&engine, id);
                }
            });
        },
    );
    if let Some(record) = engine.ledger.borrow_mut().pin_mut(id) {
        record.close_listener = Some(listener);
    }

    engine.persist_counts();
    console::log!("pinner: pinned", id.to_string());
    true
}

pub(crate) fn unpin(engine: &Rc<Engine>, id: PinId) {
    let Some(record) = engine.ledger.borrow_mut().remove_pin(id) else {
        return;
    };
    let style = record.element.style();
    for (prop, value) in record.saved.restore_pairs() {
        if value.is_empty() {
            let _ = style.remove_property(prop);
        } else {
            let _ = style.set_property(prop, value);
        }
    }
    let classes = record.element.class_list();
    let _ = classes.remove_1(PIN_MARKER_CLASS);
    let _ = classes.remove_1(PIN_ROW_CLASS);
    let _ = record.element.remove_attribute(PIN_ID_ATTR);
    record.placeholder.remove();
    record.close_control.remove();
    drop(record);

    engine.restack();
    engine.persist_counts();
    engine.record_event(fusen_core::telemetry::TelemetryKind::PinReleased, 0.0);
    console::log!("pinner: unpinned", id.to_string());
}

fn snapshot_styles(element: &HtmlElement) -> StyleSnapshot {
    let style = element.style();
    let mut saved = StyleSnapshot::default();
    for prop in SNAPSHOT_PROPS {
        saved.set(prop, style.get_property_value(prop).unwrap_or_default());
    }
    saved
}

fn build_placeholder(document: &Document, element: &HtmlElement) -> Option<HtmlElement> {
    let placeholder = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    placeholder.set_class_name(PLACEHOLDER_CLASS);
    placeholder.style().set_css_text(&format!(
        "height: {}px; background: rgba(255, 107, 53, 0.1); border: 2px dashed #ff6b35; \
         display: flex; align-items: center; justify-content: center; color: #ff6b35; \
         font-size: 14px; font-weight: bold;",
        element.offset_height()
    ));
    placeholder.set_text_content(Some("📌 Element pinned to top"));
    Some(placeholder)
}

fn build_close_control(document: &Document) -> Option<HtmlElement> {
    let control = document
        .create_element("button")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    control.set_class_name(CLOSE_CLASS);
    control.set_text_content(Some("×"));
    control.set_title("Unpin element");
    control.style().set_css_text(CLOSE_CSS);
    Some(control)
}
