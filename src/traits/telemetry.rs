// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::Debug;

/// Sink for cross-cutting observability data, injected into telemetry-aware operators.
///
/// The engine hands the provider to operators and never calls [`record`] itself; what a
/// measurement means is between the operator and the backend.
///
/// [`record`]: TelemetryProvider::record
pub trait TelemetryProvider: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn record(&self, operator: &str, key: &str, value: f64);
}
