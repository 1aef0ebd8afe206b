// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and telemetry providers.
//!
//! Log messages follow a struct-based pattern with `Display` implementations so the
//! engine carries no scattered magic strings:
//! * `messages::stream` - Stream lifecycle and emission events
//! * `messages::graph` - Graph traversal and topology analysis
//!
//! The two reference [`TelemetryProvider`](crate::traits::TelemetryProvider)
//! implementations live in `telemetry`.

pub mod messages;
pub mod telemetry;

pub use telemetry::{NoopTelemetry, TracingTelemetry};

use tracing_subscriber::EnvFilter;

use crate::config::consts::LOG_FILTER_ENV;

/// Install a `fmt` subscriber filtered by `STREAMWOOD_LOG`, falling back to `default_filter`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
