//! Telemetry capability: named events and duration metrics.
//!
//! The core only emits; transport and buffering belong to the collaborator
//! behind this trait. The default implementation rides on `tracing` so events
//! land in the same structured log stream as everything else.

use std::time::Duration;

pub trait Telemetry: Send + Sync {
    fn track_event(&self, name: &str);
    fn track_duration(&self, name: &str, elapsed: Duration);
}

/// Emits telemetry as structured log events under the `telemetry` target.
#[derive(Clone, Debug, Default)]
pub struct TracingTelemetry;

impl Telemetry for TracingTelemetry {
    fn track_event(&self, name: &str) {
        tracing::info!(target: "telemetry", event = name);
    }

    fn track_duration(&self, name: &str, elapsed: Duration) {
        tracing::info!(target: "telemetry", metric = name, elapsed_ms = elapsed.as_millis() as u64);
    }
}
