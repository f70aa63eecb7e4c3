use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Capturing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    Note,
    Scroll,
}

impl PlacementMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PlacementMode::Note => "note",
            PlacementMode::Scroll => "scroll",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "note" => Some(PlacementMode::Note),
            "scroll" => Some(PlacementMode::Scroll),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Entered,
    Exited,
    Unchanged,
}

#[derive(Clone, Copy, Debug)]
pub struct SelectionMachine {
    state: SelectionState,
    mode: PlacementMode,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
            mode: PlacementMode::Note,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PlacementMode) {
        self.mode = mode;
    }

    pub fn is_capturing(&self) -> bool {
        self.state == SelectionState::Capturing
    }

    pub fn enter(&mut self) -> Transition {
        match self.state {
            SelectionState::Idle => {
                self.state = SelectionState::Capturing;
                Transition::Entered
            }
            SelectionState::Capturing => Transition::Unchanged,
        }
    }

    pub fn exit(&mut self) -> Transition {
        match self.state {
            SelectionState::Capturing => {
                self.state = SelectionState::Idle;
                Transition::Exited
            }
            SelectionState::Idle => Transition::Unchanged,
        }
    }

    pub fn toggle(&mut self) -> Transition {
        match self.state {
            SelectionState::Idle => self.enter(),
            SelectionState::Capturing => self.exit(),
        }
    }

    pub fn complete_capture(&mut self) -> Option<PlacementMode> {
        if self.state != SelectionState::Capturing {
            return None;
        }
        self.state = SelectionState::Idle;
        Some(self.mode)
    }
}

impl Default for SelectionMachine {
    fn default() -> Self {
        Self::new()
    }
}
