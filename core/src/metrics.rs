use std::collections::VecDeque;
use std::fmt::Write;

pub const VELOCITY_BUFFER_LEN: usize = 50;
pub const SAMPLE_RETENTION_MS: f64 = 300_000.0;
pub const RECENT_WINDOW_MS: f64 = 60_000.0;
pub const SLOW_HANDLER_LIMIT_MS: f64 = 16.0;

#[derive(Clone, Copy, Debug)]
struct DurationSample {
    duration_ms: f64,
    at_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricsSnapshot {
    pub scroll_events: u64,
    pub sticky_activations: u64,
    pub avg_scroll_velocity: f64,
    pub performance_issues: u64,
}

#[derive(Clone, Debug)]
pub struct ScrollMetrics {
    scroll_events: u64,
    sticky_activations: u64,
    performance_issues: u64,
    velocity: VecDeque<f64>,
    avg_velocity: f64,
    last_scroll_ms: f64,
    last_scroll_y: f64,
    durations: VecDeque<DurationSample>,
}

impl ScrollMetrics {
    pub fn new() -> Self {
        Self {
            scroll_events: 0,
            sticky_activations: 0,
            performance_issues: 0,
            velocity: VecDeque::with_capacity(VELOCITY_BUFFER_LEN),
            avg_velocity: 0.0,
            last_scroll_ms: 0.0,
            last_scroll_y: 0.0,
            durations: VecDeque::new(),
        }
    }

    pub fn record_scroll(&mut self, scroll_y: f64, now_ms: f64) {
        self.scroll_events += 1;
        if self.last_scroll_ms > 0.0 {
            let time_delta = now_ms - self.last_scroll_ms;
            if time_delta > 0.0 {
                let velocity = (scroll_y - self.last_scroll_y).abs() / time_delta;
                if self.velocity.len() == VELOCITY_BUFFER_LEN {
                    self.velocity.pop_front();
                }
                self.velocity.push_back(velocity);
                self.avg_velocity =
                    self.velocity.iter().sum::<f64>() / self.velocity.len() as f64;
            }
        }
        self.last_scroll_ms = now_ms;
        self.last_scroll_y = scroll_y;
    }

    pub fn record_activation(&mut self) {
        self.sticky_activations += 1;
    }

    pub fn record_handler_duration(&mut self, duration_ms: f64, now_ms: f64) {
        self.durations.push_back(DurationSample {
            duration_ms,
            at_ms: now_ms,
        });
        if duration_ms > SLOW_HANDLER_LIMIT_MS {
            self.performance_issues += 1;
        }
    }

    pub fn avg_handler_ms(&self, now_ms: f64) -> f64 {
        let recent: Vec<f64> = self
            .durations
            .iter()
            .filter(|sample| now_ms - sample.at_ms < RECENT_WINDOW_MS)
            .map(|sample| sample.duration_ms)
            .collect();
        if recent.is_empty() {
            return 0.0;
        }
        recent.iter().sum::<f64>() / recent.len() as f64
    }

    pub fn prune(&mut self, now_ms: f64) {
        let cutoff = now_ms - SAMPLE_RETENTION_MS;
        self.durations.retain(|sample| sample.at_ms > cutoff);
        self.scroll_events = 0;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            scroll_events: self.scroll_events,
            sticky_activations: self.sticky_activations,
            avg_scroll_velocity: self.avg_velocity,
            performance_issues: self.performance_issues,
        }
    }

    pub fn to_prometheus(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "# HELP sticky_scroll_events_total Total number of scroll events"
        );
        let _ = writeln!(out, "# TYPE sticky_scroll_events_total counter");
        let _ = writeln!(out, "sticky_scroll_events_total {}", self.scroll_events);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "# HELP sticky_activations_total Total sticky element activations"
        );
        let _ = writeln!(out, "# TYPE sticky_activations_total counter");
        let _ = writeln!(out, "sticky_activations_total {}", self.sticky_activations);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "# HELP scroll_velocity_avg Average scroll velocity (px/ms)"
        );
        let _ = writeln!(out, "# TYPE scroll_velocity_avg gauge");
        let _ = writeln!(out, "scroll_velocity_avg {:.3}", self.avg_velocity);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "# HELP performance_issues_total Performance issues detected"
        );
        let _ = writeln!(out, "# TYPE performance_issues_total counter");
        let _ = write!(out, "performance_issues_total {}", self.performance_issues);
        out
    }
}

impl Default for ScrollMetrics {
    fn default() -> Self {
        Self::new()
    }
}
