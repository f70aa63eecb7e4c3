use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

pub(crate) fn detect_pdf_viewer(window: &Window, document: &Document) -> bool {
    if window
        .location()
        .href()
        .map(|href| href.contains(".pdf"))
        .unwrap_or(false)
    {
        return true;
    }
    if has(document, "embed[type=\"application/pdf\"]")
        || has(document, "object[type=\"application/pdf\"]")
    {
        return true;
    }
    if pdf_js_present(window) {
        return true;
    }
    if has(document, "#viewer") && has(document, ".page") {
        return true;
    }
    if has(document, "#adobe-dc-view") {
        return true;
    }
    if document
        .body()
        .map(|body| body.class_list().contains("pdf-viewer"))
        .unwrap_or(false)
    {
        return true;
    }
    document.title().to_lowercase().contains(".pdf")
}

fn has(document: &Document, selector: &str) -> bool {
    matches!(document.query_selector(selector), Ok(Some(_)))
}

fn pdf_js_present(window: &Window) -> bool {
    Reflect::get(window, &JsValue::from_str("PDFViewerApplication"))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}
