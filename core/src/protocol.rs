use serde::{Deserialize, Serialize};

use crate::selection::PlacementMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ToggleSelection,
    ClearAll,
    GetStats,
}

impl Command {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "toggleSelection" => Some(Command::ToggleSelection),
            "clearAll" => Some(Command::ClearAll),
            "getStats" => Some(Command::GetStats),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub action: Option<String>,
}

impl CommandRequest {
    pub fn command(&self) -> Option<Command> {
        Command::parse(self.action.as_deref()?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub sticky_count: usize,
    pub sticky_scroll_count: usize,
    pub total_count: usize,
    pub selection_mode: bool,
    pub current_mode: PlacementMode,
    pub is_pdf_viewer: bool,
}
