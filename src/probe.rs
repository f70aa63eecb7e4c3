use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::pinner::PIN_MARKER_CLASS;
use fusen_core::{base_offset, CandidatePosition, ChromeCandidate};

pub(crate) const CHROME_SELECTORS: [&str; 10] = [
    "header",
    "nav",
    ".header",
    ".navbar",
    ".nav",
    ".navigation",
    ".top-bar",
    ".toolbar",
    ".menu-bar",
    "[role=\"banner\"]",
];

const ENGINE_ARTIFACT_SELECTOR: &str =
    "#fusen-controls, #fusen-overlay, .fusen-note-container, .fusen-placeholder";

pub(crate) fn compute_base_offset(window: &Window, document: &Document) -> f64 {
    let primary = selector_candidates(window, document);
    let fallback = if base_offset(&primary, &[]) == 0.0 {
        full_scan_candidates(window, document)
    } else {
        Vec::new()
    };
    base_offset(&primary, &fallback)
}

fn selector_candidates(window: &Window, document: &Document) -> Vec<ChromeCandidate> {
    let mut candidates = Vec::new();
    for selector in CHROME_SELECTORS {
        let Ok(list) = document.query_selector_all(selector) else {
            continue;
        };
        collect_candidates(window, &list, &mut candidates);
    }
    candidates
}

fn full_scan_candidates(window: &Window, document: &Document) -> Vec<ChromeCandidate> {
    let mut candidates = Vec::new();
    if let Ok(list) = document.query_selector_all("*") {
        collect_candidates(window, &list, &mut candidates);
    }
    candidates
}

fn collect_candidates(
    window: &Window,
    list: &web_sys::NodeList,
    candidates: &mut Vec<ChromeCandidate>,
) {
    for index in 0..list.length() {
        let Some(node) = list.get(index) else {
            continue;
        };
        let Some(element) = node.dyn_ref::<Element>() else {
            continue;
        };
        if is_engine_artifact(element) {
            continue;
        }
        if let Some(candidate) = candidate_from(window, element) {
            candidates.push(candidate);
        }
    }
}

fn is_engine_artifact(element: &Element) -> bool {
    element.class_list().contains(PIN_MARKER_CLASS)
        || matches!(element.closest(ENGINE_ARTIFACT_SELECTOR), Ok(Some(_)))
}

fn candidate_from(window: &Window, element: &Element) -> Option<ChromeCandidate> {
    let style = window.get_computed_style(element).ok()??;
    let position = match style.get_property_value("position").ok()?.as_str() {
        "fixed" => CandidatePosition::Fixed,
        "sticky" => CandidatePosition::Sticky,
        _ => return None,
    };
    let rect = element.get_bounding_client_rect();
    Some(ChromeCandidate {
        position,
        rect_top: rect.top(),
        width: rect.width(),
        height: rect.height(),
        declared_top: parse_px(&style.get_property_value("top").ok()?),
    })
}

fn parse_px(value: &str) -> Option<f64> {
    value.strip_suffix("px")?.trim().parse().ok()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn fixed_header_raises_the_base_offset() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let header: HtmlElement = document
            .create_element("header")
            .unwrap()
            .dyn_into()
            .unwrap();
        header
            .style()
            .set_css_text("position: fixed; top: 0; left: 0; width: 100%; height: 48px;");
        document.body().unwrap().append_child(&header).unwrap();

        let offset = compute_base_offset(&window, &document);
        assert!(offset >= 48.0, "offset {offset} does not clear the header");

        header.remove();
        assert_eq!(compute_base_offset(&window, &document), 0.0);
    }

    #[wasm_bindgen_test]
    fn static_chrome_is_not_counted() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let nav: HtmlElement = document.create_element("nav").unwrap().dyn_into().unwrap();
        nav.style().set_css_text("height: 120px;");
        document.body().unwrap().append_child(&nav).unwrap();

        assert_eq!(compute_base_offset(&window, &document), 0.0);
        nav.remove();
    }
}
