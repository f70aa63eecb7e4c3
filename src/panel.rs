use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::engine::Engine;
use fusen_core::PlacementMode;

pub(crate) const PANEL_ID: &str = "fusen-controls";
const STYLE_ID: &str = "fusen-style";

const PANEL_HTML: &str = r#"
<div class="fusen-main-toggle" title="Fusen Controls"><div class="fusen-main-icon">🗒️</div></div>
<div class="fusen-expanded-panel">
  <button class="fusen-btn fusen-mode-btn fusen-mode-active" data-mode="note" title="Sticky Notes - Copy to floating notes"><span class="fusen-btn-icon">🗒️</span></button>
  <button class="fusen-btn fusen-mode-btn fusen-mode-inactive" data-mode="scroll" title="Sticky Scroll - Pin to top"><span class="fusen-btn-icon">📌</span></button>
  <button class="fusen-btn fusen-toggle-btn fusen-selection-inactive" title="Toggle Selection Mode"><span class="fusen-btn-icon">⚡</span></button>
  <div class="fusen-separator"></div>
  <button class="fusen-btn fusen-clear-btn" title="Clear All"><span class="fusen-btn-icon">🗑️</span></button>
</div>
"#;

const ENGINE_CSS: &str = r#"
.fusen-highlight { outline: 3px solid #ff6b35 !important; outline-offset: 2px; cursor: crosshair !important; }
.fusen-noted { outline: 2px dashed #4caf50 !important; outline-offset: 2px; }
#fusen-overlay { position: fixed; top: 16px; left: 50%; transform: translateX(-50%); z-index: 10001; pointer-events: none; }
#fusen-overlay .fusen-instructions { background: rgba(33, 33, 33, 0.92); color: #fff; padding: 10px 18px; border-radius: 8px; font: 13px/1.5 system-ui, sans-serif; text-align: center; box-shadow: 0 4px 14px rgba(0,0,0,0.25); }
#fusen-controls { position: fixed; bottom: 24px; right: 24px; z-index: 10002; display: flex; align-items: center; gap: 8px; font: 13px system-ui, sans-serif; }
#fusen-controls .fusen-main-toggle { width: 44px; height: 44px; border-radius: 50%; background: #ff6b35; display: flex; align-items: center; justify-content: center; cursor: pointer; box-shadow: 0 2px 8px rgba(0,0,0,0.3); font-size: 20px; }
#fusen-controls .fusen-expanded-panel { display: none; align-items: center; gap: 6px; background: #fff; border-radius: 22px; padding: 6px 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.2); }
#fusen-controls.fusen-expanded .fusen-expanded-panel { display: flex; }
#fusen-controls .fusen-btn { width: 32px; height: 32px; border: none; border-radius: 50%; background: #f0f0f0; cursor: pointer; font-size: 15px; display: flex; align-items: center; justify-content: center; }
#fusen-controls .fusen-mode-active { background: #ffd9c7; box-shadow: inset 0 0 0 2px #ff6b35; }
#fusen-controls .fusen-selection-active { background: #c8f7c5; box-shadow: inset 0 0 0 2px #4caf50; }
#fusen-controls .fusen-separator { width: 1px; height: 22px; background: #ddd; }
.fusen-note-container { position: fixed; top: 80px; right: 24px; width: 320px; max-height: 60vh; z-index: 10000; background: #fffbe6; border: 1px solid #e6d87a; border-radius: 8px; box-shadow: 0 6px 18px rgba(0,0,0,0.25); display: flex; flex-direction: column; overflow: hidden; font: 13px system-ui, sans-serif; }
.fusen-note-header { display: flex; align-items: center; justify-content: space-between; padding: 6px 10px; background: #f7efc0; cursor: move; user-select: none; }
.fusen-note-controls { display: flex; gap: 4px; }
.fusen-note-btn { width: 20px; height: 20px; border: none; border-radius: 4px; background: transparent; cursor: pointer; font-size: 13px; line-height: 1; }
.fusen-note-btn:hover { background: rgba(0,0,0,0.08); }
.fusen-note-content { padding: 10px; overflow: auto; }
.fusen-pin-row { transition: top 0.15s ease-out; }
"#;

pub(crate) struct Panel {
    root: HtmlElement,
    toggle_button: HtmlElement,
    main_icon: HtmlElement,
    mode_buttons: Vec<(PlacementMode, HtmlElement)>,
    _listeners: Vec<EventListener>,
}

impl Panel {
    pub(crate) fn install(engine: &Rc<Engine>) -> Option<Self> {
        let document = &engine.document;
        let body = document.body()?;
        let root = document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        root.set_id(PANEL_ID);
        root.set_class_name("fusen-collapsed");
        root.set_inner_html(PANEL_HTML);
        body.append_child(&root).ok()?;

        let main_toggle = query(&root, ".fusen-main-toggle")?;
        let main_icon = query(&root, ".fusen-main-icon")?;
        let toggle_button = query(&root, ".fusen-toggle-btn")?;
        let clear_button = query(&root, ".fusen-clear-btn")?;

        let mut listeners = Vec::new();

        let panel_root = root.clone();
        listeners.push(EventListener::new(&main_toggle, "click", move |_| {
            let classes = panel_root.class_list();
            if classes.contains("fusen-collapsed") {
                let _ = classes.remove_1("fusen-collapsed");
                let _ = classes.add_1("fusen-expanded");
            } else {
                let _ = classes.remove_1("fusen-expanded");
                let _ = classes.add_1("fusen-collapsed");
            }
        }));

        let mut mode_buttons = Vec::new();
        let found = root.query_selector_all(".fusen-mode-btn").ok()?;
        for index in 0..found.length() {
            let Some(node) = found.get(index) else {
                continue;
            };
            let Ok(button) = node.dyn_into::<HtmlElement>() else {
                continue;
            };
            let Some(mode) = button
                .get_attribute("data-mode")
                .and_then(|value| PlacementMode::parse(&value))
            else {
                console::warn!("panel: mode button without a mode");
                continue;
            };
            let weak = Rc::downgrade(engine);
            listeners.push(EventListener::new(&button, "click", move |_| {
                if let Some(engine) = weak.upgrade() {
                    engine.set_mode(mode);
                }
            }));
            mode_buttons.push((mode, button));
        }

        let weak = Rc::downgrade(engine);
        listeners.push(EventListener::new(&toggle_button, "click", move |_| {
            if let Some(engine) = weak.upgrade() {
                engine.toggle_selection();
            }
        }));

        let weak = Rc::downgrade(engine);
        listeners.push(EventListener::new(&clear_button, "click", move |_| {
            if let Some(engine) = weak.upgrade() {
                engine.clear_all();
            }
        }));

        Some(Self {
            root,
            toggle_button,
            main_icon,
            mode_buttons,
            _listeners: listeners,
        })
    }

    pub(crate) fn expand(&self) {
        let classes = self.root.class_list();
        let _ = classes.remove_1("fusen-collapsed");
        let _ = classes.add_1("fusen-expanded");
    }

    pub(crate) fn set_selection_active(&self, active: bool) {
        let classes = self.toggle_button.class_list();
        if active {
            let _ = classes.add_1("fusen-selection-active");
            let _ = classes.remove_1("fusen-selection-inactive");
        } else {
            let _ = classes.remove_1("fusen-selection-active");
            let _ = classes.add_1("fusen-selection-inactive");
        }
    }

    pub(crate) fn set_mode(&self, mode: PlacementMode) {
        let icon = match mode {
            PlacementMode::Note => "🗒️",
            PlacementMode::Scroll => "📌",
        };
        self.main_icon.set_text_content(Some(icon));
        for (button_mode, button) in &self.mode_buttons {
            let classes = button.class_list();
            if *button_mode == mode {
                let _ = classes.add_1("fusen-mode-active");
                let _ = classes.remove_1("fusen-mode-inactive");
            } else {
                let _ = classes.remove_1("fusen-mode-active");
                let _ = classes.add_1("fusen-mode-inactive");
            }
        }
    }

    pub(crate) fn mark_pdf(&self) {
        self.toggle_button
            .set_title("Toggle Sticky Scroll for PDF (Pin text or images)");
        let _ = self
            .toggle_button
            .style()
            .set_property("background", "#ff6b35");
    }
}

pub(crate) fn inject_styles(document: &Document) {
    if matches!(document.query_selector(&format!("#{}", STYLE_ID)), Ok(Some(_))) {
        return;
    }
    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_id(STYLE_ID);
    style.set_text_content(Some(ENGINE_CSS));
    let mounted = match document.head() {
        Some(head) => head.append_child(&style).is_ok(),
        None => false,
    };
    if !mounted {
        if let Some(body) = document.body() {
            let _ = body.append_child(&style);
        }
    }
}

fn query(root: &Element, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()??
        .dyn_into::<HtmlElement>()
        .ok()
}
