use std::cell::Cell;
use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::engine::Engine;
use fusen_core::NoteId;

pub(crate) const NOTE_CONTAINER_CLASS: &str = "fusen-note-container";
pub(crate) const NOTED_MARK_CLASS: &str = "fusen-noted";
const HEADER_CLASS: &str = "fusen-note-header";
const TITLE_CLASS: &str = "fusen-note-title";
const CONTROLS_CLASS: &str = "fusen-note-controls";
const CONTENT_CLASS: &str = "fusen-note-content";
const BUTTON_CLASS: &str = "fusen-note-btn";

#[derive(Default)]
pub(crate) struct DragOffset {
    dragging: Cell<bool>,
    start_x: Cell<f64>,
    start_y: Cell<f64>,
    x: Cell<f64>,
    y: Cell<f64>,
}

pub(crate) struct NoteArtifact {
    pub(crate) container: HtmlElement,
    pub(crate) original: Element,
    pub(crate) content: HtmlElement,
    pub(crate) minimize_control: HtmlElement,
    pub(crate) minimized: bool,
    pub(crate) drag: Rc<DragOffset>,
    pub(crate) listeners: Vec<EventListener>,
}

pub(crate) fn create_note(engine: &Rc<Engine>, element: Element) -> bool {
    let document = &engine.document;
    let Some(body) = document.body() else {
        return false;
    };
    let Ok(copy) = element.clone_node_with_deep(true) else {
        console::warn!("notes: target copy failed");
        return false;
    };

    let Some(container) = html_div(document, NOTE_CONTAINER_CLASS) else {
        return false;
    };
    let Some(header) = html_div(document, HEADER_CLASS) else {
        return false;
    };
    let Some(title) = html_element(document, "span", TITLE_CLASS) else {
        return false;
    };
    title.set_text_content(Some("📝 Sticky Note"));
    let Some(controls) = html_div(document, CONTROLS_CLASS) else {
        return false;
    };
    let Some(minimize_control) = note_button(document, "−", "Minimize") else {
        return false;
    };
    let Some(close_control) = note_button(document, "×", "Close") else {
        return false;
    };
    let Some(content) = html_div(document, CONTENT_CLASS) else {
        return false;
    };

    let _ = controls.append_child(&minimize_control);
    let _ = controls.append_child(&close_control);
    let _ = header.append_child(&title);
    let _ = header.append_child(&controls);
    let _ = content.append_child(&copy);
    let _ = container.append_child(&header);
    let _ = container.append_child(&content);
    if body.append_child(&container).is_err() {
        console::warn!("notes: container mount failed");
        return false;
    }
    let _ = element.class_list().add_1(NOTED_MARK_CLASS);

    let drag = Rc::new(DragOffset::default());
    let record = NoteArtifact {
        container: container.clone(),
        original: element,
        content,
        minimize_control: minimize_control.clone(),
        minimized: false,
        drag: drag.clone(),
        listeners: Vec::new(),
    };
    let id = engine.ledger.borrow_mut().add_note(record);
    container.set_id(&id.to_string());

    let listeners = wire_listeners(
        engine,
        id,
        &container,
        &header,
        &minimize_control,
        &close_control,
        drag,
    );
    if let Some(record) = engine.ledger.borrow_mut().note_mut(id) {
        record.listeners = listeners;
    }

    engine.persist_counts();
    console::log!("notes: created", id.to_string());
    true
}

pub(crate) fn remove_note(engine: &Rc<Engine>, id: NoteId) {
    let Some(record) = engine.ledger.borrow_mut().remove_note(id) else {
        return;
    };
    let _ = record.original.class_list().remove_1(NOTED_MARK_CLASS);
    record.container.remove();
    drop(record);
    engine.persist_counts();
    console::log!("notes: removed", id.to_string());
}

pub(crate) fn toggle_minimize(engine: &Engine, id: NoteId) {
    let mut ledger = engine.ledger.borrow_mut();
    let Some(record) = ledger.note_mut(id) else {
        return;
    };
    record.minimized = !record.minimized;
    let (display, glyph) = if record.minimized {
        ("none", "+")
    } else {
        ("block", "−")
    };
    let _ = record.content.style().set_property("display", display);
    record.minimize_control.set_text_content(Some(glyph));
}

fn wire_listeners(
    engine: &Rc<Engine>,
    id: NoteId,
    container: &HtmlElement,
    header: &HtmlElement,
    minimize_control: &HtmlElement,
    close_control: &HtmlElement,
    drag: Rc<DragOffset>,
) -> Vec<EventListener> {
    let mut listeners = Vec::with_capacity(5);

    let weak = Rc::downgrade(engine);
    listeners.push(EventListener::new(close_control, "click", move |_| {
        let weak = weak.clone();
        spawn_local(async move {
            if let Some(engine) = weak.upgrade() {
                remove_note(&engine, id);
            }
        });
    }));

    let weak = Rc::downgrade(engine);
    listeners.push(EventListener::new(minimize_control, "click", move |_| {
        if let Some(engine) = weak.upgrade() {
            toggle_minimize(&engine, id);
        }
    }));

    let drag_down = drag.clone();
    listeners.push(EventListener::new(header, "mousedown", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        if let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
            if matches!(target.closest(&format!(".{}", BUTTON_CLASS)), Ok(Some(_))) {
                return;
            }
        }
        drag_down.start_x.set(f64::from(mouse.client_x()) - drag_down.x.get());
        drag_down.start_y.set(f64::from(mouse.client_y()) - drag_down.y.get());
        drag_down.dragging.set(true);
    }));

    let drag_move = drag.clone();
    let dragged = container.clone();
    let document = engine.document.clone();
    listeners.push(EventListener::new_with_options(
        &document,
        "mousemove",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            if !drag_move.dragging.get() {
                return;
            }
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            event.prevent_default();
            let x = f64::from(mouse.client_x()) - drag_move.start_x.get();
            let y = f64::from(mouse.client_y()) - drag_move.start_y.get();
            drag_move.x.set(x);
            drag_move.y.set(y);
            let _ = dragged
                .style()
                .set_property("transform", &format!("translate({}px, {}px)", x, y));
        },
    ));

    let drag_up = drag;
    listeners.push(EventListener::new(&document, "mouseup", move |_| {
        drag_up.dragging.set(false);
    }));

    listeners
}

fn html_div(document: &Document, class: &str) -> Option<HtmlElement> {
    html_element(document, "div", class)
}

fn html_element(document: &Document, tag: &str, class: &str) -> Option<HtmlElement> {
    let element = document
        .create_element(tag)
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    element.set_class_name(class);
    Some(element)
}

fn note_button(document: &Document, glyph: &str, label: &str) -> Option<HtmlElement> {
    let button = html_element(document, "button", BUTTON_CLASS)?;
    button.set_text_content(Some(glyph));
    button.set_title(label);
    Some(button)
}
