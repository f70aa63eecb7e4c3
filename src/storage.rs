use std::rc::Rc;

use gloo::console;
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::engine::Engine;
use fusen_core::health::HealthStatus;

pub(crate) const COUNT_KEY_NOTES: &str = "stickyElementsCount";
pub(crate) const COUNT_KEY_PINS: &str = "stickyScrollCount";
pub(crate) const HEALTH_KEY: &str = "extension_health";
pub(crate) const CLIENT_ID_KEY: &str = "clientId";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum HostError {
    Unavailable,
    Failed(String),
}

impl HostError {
    pub(crate) fn message(&self) -> String {
        match self {
            HostError::Unavailable => "host storage unavailable".to_string(),
            HostError::Failed(detail) => detail.clone(),
        }
    }
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

pub(crate) fn persist_counts(note_count: usize, pin_count: usize) {
    spawn_local(async move {
        if let Err(err) = save_counts(note_count, pin_count).await {
            console::warn!("storage: counts not persisted", err.message());
        }
    });
}

pub(crate) fn persist_health(status: &HealthStatus) {
    let Ok(raw) = serde_json::to_string(status) else {
        return;
    };
    spawn_local(async move {
        if let Err(err) = save_json_value(HEALTH_KEY, &raw).await {
            console::warn!("storage: health not persisted", err.message());
        }
    });
}

pub(crate) fn log_saved_counts() {
    spawn_local(async {
        match read_value(COUNT_KEY_NOTES).await {
            Ok(Some(value)) => {
                console::log!("storage: loaded sticky elements count", value.as_f64().unwrap_or(0.0));
            }
            Ok(None) => console::log!("storage: loaded sticky elements count", 0.0),
            Err(err) => console::log!("storage: saved counts unavailable", err.message()),
        }
    });
}

pub(crate) fn adopt_client_id(engine: &Rc<Engine>) {
    let weak = Rc::downgrade(engine);
    spawn_local(async move {
        let stored = read_value(CLIENT_ID_KEY).await;
        let Some(engine) = weak.upgrade() else {
            return;
        };
        match stored {
            Ok(Some(value)) => {
                if let Some(id) = value.as_string() {
                    *engine.client_id.borrow_mut() = id;
                    return;
                }
            }
            Ok(None) => {
                let id = engine.client_id.borrow().clone();
                if let Err(err) = save_string(CLIENT_ID_KEY, &id).await {
                    console::warn!("storage: client id not persisted", err.message());
                }
            }
            Err(_) => {}
        }
    });
}

async fn save_counts(note_count: usize, pin_count: usize) -> Result<(), HostError> {
    let entry = Object::new();
    let _ = Reflect::set(
        &entry,
        &JsValue::from_str(COUNT_KEY_NOTES),
        &JsValue::from_f64(note_count as f64),
    );
    let _ = Reflect::set(
        &entry,
        &JsValue::from_str(COUNT_KEY_PINS),
        &JsValue::from_f64(pin_count as f64),
    );
    call_area("set", &entry.into()).await.map(|_| ())
}

async fn save_string(key: &str, value: &str) -> Result<(), HostError> {
    let entry = Object::new();
    let _ = Reflect::set(&entry, &JsValue::from_str(key), &JsValue::from_str(value));
    call_area("set", &entry.into()).await.map(|_| ())
}

async fn save_json_value(key: &str, raw: &str) -> Result<(), HostError> {
    let value = js_sys::JSON::parse(raw).map_err(|err| HostError::Failed(js_err(err)))?;
    let entry = Object::new();
    let _ = Reflect::set(&entry, &JsValue::from_str(key), &value);
    call_area("set", &entry.into()).await.map(|_| ())
}

async fn read_value(key: &str) -> Result<Option<JsValue>, HostError> {
    let keys = Array::new();
    keys.push(&JsValue::from_str(key));
    let result = call_area("get", &keys.into()).await?;
    let value =
        Reflect::get(&result, &JsValue::from_str(key)).map_err(|err| HostError::Failed(js_err(err)))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    Ok(Some(value))
}

async fn call_area(method: &str, arg: &JsValue) -> Result<JsValue, HostError> {
    let Some(area) = storage_area() else {
        return Err(HostError::Unavailable);
    };
    let Some(func) = area_method(&area, method) else {
        return Err(HostError::Unavailable);
    };
    let value = func
        .call1(&area, arg)
        .map_err(|err| HostError::Failed(js_err(err)))?;
    match value.dyn_into::<Promise>() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .map_err(|err| HostError::Failed(js_err(err))),
        Err(value) => Ok(value),
    }
}

fn storage_area() -> Option<Object> {
    let window = web_sys::window()?;
    let chrome = get_defined(window.as_ref(), "chrome")?;
    let storage = get_defined(&chrome, "storage")?;
    let local = get_defined(&storage, "local")?;
    local.dyn_into::<Object>().ok()
}

fn area_method(area: &Object, name: &str) -> Option<Function> {
    get_defined(area.as_ref(), name)?.dyn_into::<Function>().ok()
}

fn get_defined(target: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(value)
}
