use std::rc::Rc;

use gloo::console;
use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::engine::Engine;
use crate::storage;
use fusen_core::{Ack, Command, CommandRequest};

pub(crate) fn install(engine: Rc<Engine>) -> bool {
    let Some(port) = on_message_port() else {
        return false;
    };
    let Some(add_listener) = method(&port, "addListener") else {
        return false;
    };
    let handler = Closure::<dyn FnMut(JsValue, JsValue, Function) -> JsValue>::new(
        move |request, _sender, send_response| {
            handle_request(&engine, request, &send_response);
            JsValue::FALSE
        },
    );
    let bound = add_listener
        .call1(&port, handler.as_ref().unchecked_ref())
        .is_ok();
    handler.forget();
    bound
}

fn handle_request(engine: &Rc<Engine>, request: JsValue, send_response: &Function) {
    let parsed = js_sys::JSON::stringify(&request)
        .ok()
        .and_then(|raw| raw.as_string())
        .and_then(|raw| serde_json::from_str::<CommandRequest>(&raw).ok());
    let Some(request) = parsed else {
        respond(send_response, &Ack::failed());
        return;
    };
    match request.command() {
        Some(Command::ToggleSelection) => {
            engine.toggle_selection();
            respond(send_response, &Ack::ok());
        }
        Some(Command::ClearAll) => {
            engine.clear_all();
            respond(send_response, &Ack::ok());
        }
        Some(Command::GetStats) => {
            respond(send_response, &engine.stats());
        }
        None => {}
    }
}

fn respond<T: Serialize>(send_response: &Function, payload: &T) {
    let Ok(raw) = serde_json::to_string(payload) else {
        return;
    };
    let Ok(value) = js_sys::JSON::parse(&raw) else {
        return;
    };
    if let Err(err) = send_response.call1(&JsValue::NULL, &value) {
        console::warn!("messaging: response channel closed", storage::js_err(err));
    }
}

fn on_message_port() -> Option<Object> {
    let window = web_sys::window()?;
    let chrome = defined(window.as_ref(), "chrome")?;
    let runtime = defined(&chrome, "runtime")?;
    defined(&runtime, "onMessage")?.dyn_into::<Object>().ok()
}

fn method(target: &Object, name: &str) -> Option<Function> {
    defined(target.as_ref(), name)?.dyn_into::<Function>().ok()
}

fn defined(target: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(value)
}
