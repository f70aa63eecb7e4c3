#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    pub position: String,
    pub top: String,
    pub left: String,
    pub width: String,
    pub z_index: String,
    pub background: String,
    pub padding: String,
}

pub const SNAPSHOT_PROPS: [&str; 7] = [
    "position", "top", "left", "width", "z-index", "background", "padding",
];

pub const PIN_Z_INDEX: &str = "9998";
pub const PIN_BOX_SHADOW: &str = "0 2px 10px rgba(0,0,0,0.1)";
pub const PIN_BORDER_BOTTOM: &str = "1px solid #e0e0e0";
pub const PIN_FALLBACK_BACKGROUND: &str = "white";
pub const PIN_FALLBACK_PADDING: &str = "10px 20px";

impl StyleSnapshot {
    pub fn get(&self, prop: &str) -> Option<&str> {
        match prop {
            "position" => Some(&self.position),
            "top" => Some(&self.top),
            "left" => Some(&self.left),
            "width" => Some(&self.width),
            "z-index" => Some(&self.z_index),
            "background" => Some(&self.background),
            "padding" => Some(&self.padding),
            _ => None,
        }
    }

    pub fn set(&mut self, prop: &str, value: String) {
        match prop {
            "position" => self.position = value,
            "top" => self.top = value,
            "left" => self.left = value,
            "width" => self.width = value,
            "z-index" => self.z_index = value,
            "background" => self.background = value,
            "padding" => self.padding = value,
            _ => {}
        }
    }

    pub fn restore_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("position", self.position.as_str()),
            ("top", self.top.as_str()),
            ("left", self.left.as_str()),
            ("width", self.width.as_str()),
            ("z-index", self.z_index.as_str()),
            ("background", self.background.as_str()),
            ("padding", self.padding.as_str()),
            ("box-shadow", ""),
            ("border-bottom", ""),
        ]
    }
}

// NOTE: an inline `background: none` is non-empty, so it counts as set and
// suppresses the white fallback.
pub fn has_inline_value(value: &str) -> bool {
    !value.is_empty()
}

pub fn pinned_declarations(top_px: f64, saved: &StyleSnapshot) -> Vec<(&'static str, String)> {
    let mut declarations = vec![
        ("position", "fixed".to_string()),
        ("top", format!("{}px", top_px)),
        ("left", "0px".to_string()),
        ("width", "100%".to_string()),
        ("z-index", PIN_Z_INDEX.to_string()),
        ("box-shadow", PIN_BOX_SHADOW.to_string()),
        ("border-bottom", PIN_BORDER_BOTTOM.to_string()),
    ];
    if !has_inline_value(&saved.background) {
        declarations.push(("background", PIN_FALLBACK_BACKGROUND.to_string()));
    }
    if !has_inline_value(&saved.padding) {
        declarations.push(("padding", PIN_FALLBACK_PADDING.to_string()));
    }
    declarations
}
