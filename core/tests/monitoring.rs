use fusen_core::health::{HealthMonitor, HEALTH_ERROR_LIMIT};
use fusen_core::metrics::{ScrollMetrics, SLOW_HANDLER_LIMIT_MS, VELOCITY_BUFFER_LEN};
use fusen_core::telemetry::{
    TelemetryBatch, TelemetryEvent, TelemetryKind, TELEMETRY_BATCH_SIZE,
};

fn event(kind: TelemetryKind, at_ms: f64) -> TelemetryEvent {
    TelemetryEvent {
        kind,
        hostname: "example.org".to_string(),
        duration_ms: 1.5,
        timestamp_ms: at_ms,
    }
}

#[test]
fn health_degrades_at_the_error_limit() {
    let mut monitor = HealthMonitor::new(1_000.0);
    for n in 0..HEALTH_ERROR_LIMIT {
        assert!(monitor.status(2_000.0).healthy, "unhealthy after {n} errors");
        monitor.record_error("boom", "page.js", 1_500.0);
    }
    let status = monitor.status(2_000.0);
    assert!(!status.healthy);
    assert_eq!(status.error_count, HEALTH_ERROR_LIMIT);
    assert_eq!(status.uptime_ms, 1_000.0);
    assert_eq!(status.last_error.as_ref().unwrap().message, "boom");

    monitor.reset();
    assert!(monitor.status(2_000.0).healthy);
    assert_eq!(monitor.status(2_000.0).error_count, 0);
}

#[test]
fn velocity_buffer_is_bounded() {
    let mut metrics = ScrollMetrics::new();
    let mut now = 0.0;
    for step in 0..(VELOCITY_BUFFER_LEN + 20) {
        now += 10.0;
        metrics.record_scroll(step as f64 * 100.0, now);
    }
    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.scroll_events, (VELOCITY_BUFFER_LEN + 20) as u64);
    assert!((snapshot.avg_scroll_velocity - 10.0).abs() < 1e-9);
}

#[test]
fn slow_handlers_count_as_performance_issues() {
    let mut metrics = ScrollMetrics::new();
    metrics.record_handler_duration(SLOW_HANDLER_LIMIT_MS / 2.0, 100.0);
    metrics.record_handler_duration(SLOW_HANDLER_LIMIT_MS * 3.0, 200.0);
    assert_eq!(metrics.snapshot().performance_issues, 1);
    assert!(metrics.avg_handler_ms(250.0) > 0.0);
}

#[test]
fn prune_drops_old_samples_and_resets_the_scroll_counter() {
    let mut metrics = ScrollMetrics::new();
    metrics.record_scroll(0.0, 1_000.0);
    metrics.record_scroll(50.0, 1_100.0);
    metrics.record_handler_duration(2.0, 1_000.0);

    metrics.prune(1_000_000.0);
    assert_eq!(metrics.snapshot().scroll_events, 0);
    assert_eq!(metrics.avg_handler_ms(1_000_000.0), 0.0);
}

#[test]
fn prometheus_export_lists_every_series() {
    let mut metrics = ScrollMetrics::new();
    metrics.record_activation();
    metrics.record_activation();
    let text = metrics.to_prometheus();

    assert!(text.contains("# TYPE sticky_scroll_events_total counter"));
    assert!(text.contains("sticky_activations_total 2"));
    assert!(text.contains("# TYPE scroll_velocity_avg gauge"));
    assert!(text.contains("scroll_velocity_avg 0.000"));
    assert!(text.ends_with("performance_issues_total 0"));
}

#[test]
fn telemetry_batches_at_the_batch_size() {
    let mut batch = TelemetryBatch::new();
    for n in 0..(TELEMETRY_BATCH_SIZE - 1) {
        assert!(batch.push(event(TelemetryKind::PinPlaced, n as f64)).is_none());
    }
    let drained = batch
        .push(event(TelemetryKind::NotePlaced, 99.0))
        .expect("batch should drain when full");
    assert_eq!(drained.len(), TELEMETRY_BATCH_SIZE);
    assert!(batch.is_empty());
}

#[test]
fn telemetry_drain_takes_partial_batches() {
    let mut batch = TelemetryBatch::new();
    batch.push(event(TelemetryKind::PinReleased, 1.0));
    let drained = batch.drain();
    assert_eq!(drained.len(), 1);
    assert!(batch.drain().is_empty());
}

#[test]
fn telemetry_event_wire_shape() {
    let value = serde_json::to_value(event(TelemetryKind::NotePlaced, 5.0)).unwrap();
    assert_eq!(value["type"], "note_placed");
    assert_eq!(value["hostname"], "example.org");
}
