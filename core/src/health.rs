use serde::Serialize;

pub const HEALTH_ERROR_LIMIT: u32 = 10;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSample {
    pub message: String,
    pub source: String,
    pub timestamp_ms: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub healthy: bool,
    pub uptime_ms: f64,
    pub error_count: u32,
    pub last_error: Option<ErrorSample>,
    pub timestamp_ms: f64,
}

#[derive(Clone, Debug)]
pub struct HealthMonitor {
    started_at_ms: f64,
    error_count: u32,
    last_error: Option<ErrorSample>,
}

impl HealthMonitor {
    pub fn new(now_ms: f64) -> Self {
        Self {
            started_at_ms: now_ms,
            error_count: 0,
            last_error: None,
        }
    }

    pub fn record_error(&mut self, message: &str, source: &str, now_ms: f64) {
        self.error_count += 1;
        self.last_error = Some(ErrorSample {
            message: message.to_string(),
            source: source.to_string(),
            timestamp_ms: now_ms,
        });
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn status(&self, now_ms: f64) -> HealthStatus {
        HealthStatus {
            healthy: self.error_count < HEALTH_ERROR_LIMIT,
            uptime_ms: (now_ms - self.started_at_ms).max(0.0),
            error_count: self.error_count,
            last_error: self.last_error.clone(),
            timestamp_ms: now_ms,
        }
    }

    pub fn reset(&mut self) {
        self.error_count = 0;
        self.last_error = None;
    }
}
