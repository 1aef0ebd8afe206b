// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::TelemetryProvider;

/// Provider that drops every measurement.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetryProvider for NoopTelemetry {
    fn name(&self) -> &str {
        "noop"
    }

    fn record(&self, _operator: &str, _key: &str, _value: f64) {}
}

/// Provider that forwards measurements as `tracing` events under the
/// `streamwood::telemetry` target.
#[derive(Debug, Clone)]
pub struct TracingTelemetry {
    stream: String,
}

impl TracingTelemetry {
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
        }
    }
}

impl TelemetryProvider for TracingTelemetry {
    fn name(&self) -> &str {
        "tracing"
    }

    fn record(&self, operator: &str, key: &str, value: f64) {
        tracing::info!(
            target: "streamwood::telemetry",
            stream = %self.stream,
            operator,
            key,
            value,
            "telemetry measurement"
        );
    }
}
