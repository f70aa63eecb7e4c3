use serde::Serialize;

pub const TELEMETRY_BATCH_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryKind {
    NotePlaced,
    PinPlaced,
    PinReleased,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TelemetryEvent {
    #[serde(rename = "type")]
    pub kind: TelemetryKind,
    pub hostname: String,
    pub duration_ms: f64,
    pub timestamp_ms: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct TelemetryPayload {
    pub events: Vec<TelemetryEvent>,
    pub client_id: String,
}

#[derive(Clone, Debug, Default)]
pub struct TelemetryBatch {
    events: Vec<TelemetryEvent>,
}

impl TelemetryBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TelemetryEvent) -> Option<Vec<TelemetryEvent>> {
        self.events.push(event);
        if self.events.len() >= TELEMETRY_BATCH_SIZE {
            return Some(std::mem::take(&mut self.events));
        }
        None
    }

    pub fn drain(&mut self) -> Vec<TelemetryEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
