// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for operator graph traversal and analysis.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Telemetry provider pushed into every telemetry-aware operator of a stream.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct TelemetryPropagated<'a> {
    pub stream: &'a str,
    pub provider: &'a str,
    pub visited: usize,
    pub initialized: usize,
}

impl Display for TelemetryPropagated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Telemetry provider '{}' propagated on stream '{}': {} operators visited, {} initialized",
            self.provider, self.stream, self.visited, self.initialized
        )
    }
}

impl StructuredLog for TelemetryPropagated<'_> {
    fn log(&self) {
        tracing::debug!(
            stream = self.stream,
            provider = self.provider,
            visited = self.visited,
            initialized = self.initialized,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "telemetry_propagation",
            span_name = name,
            stream = self.stream,
            provider = self.provider,
        )
    }
}

/// State stores gathered from the chain.
///
/// # Log Level
/// `trace!` - Runs on every store lookup
pub struct StoresCollected<'a> {
    pub stream: &'a str,
    pub visited: usize,
    pub store_count: usize,
}

impl Display for StoresCollected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Collected {} state stores from {} operators on stream '{}'",
            self.store_count, self.visited, self.stream
        )
    }
}

impl StructuredLog for StoresCollected<'_> {
    fn log(&self) {
        tracing::trace!(
            stream = self.stream,
            visited = self.visited,
            store_count = self.store_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "store_collection",
            span_name = name,
            stream = self.stream,
        )
    }
}

/// The operator chain loops back on itself.
///
/// # Log Level
/// `warn!` - Traversal still terminates, but emission may not
///
/// # Example
/// ```
/// use the_streamwood::observability::messages::graph::CycleDetected;
///
/// let cycle = vec!["a".to_string(), "b".to_string(), "a".to_string()];
/// let msg = CycleDetected {
///     stream: "orders",
///     cycle: &cycle,
/// };
///
/// assert_eq!(msg.to_string(), "Cycle detected in stream 'orders': a -> b -> a");
/// ```
pub struct CycleDetected<'a> {
    pub stream: &'a str,
    pub cycle: &'a [String],
}

impl Display for CycleDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cycle detected in stream '{}': {}",
            self.stream,
            self.cycle.join(" -> ")
        )
    }
}

impl StructuredLog for CycleDetected<'_> {
    fn log(&self) {
        tracing::warn!(
            stream = self.stream,
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "cycle_detected",
            span_name = name,
            stream = self.stream,
            cycle_length = self.cycle.len(),
        )
    }
}

/// Several paths converge on one operator.
///
/// # Log Level
/// `debug!` - Intentional fan-in is normal
pub struct FanInDetected<'a> {
    pub stream: &'a str,
    pub operator: &'a str,
    pub predecessors: usize,
}

impl Display for FanInDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operator '{}' on stream '{}' is reached from {} predecessors",
            self.operator, self.stream, self.predecessors
        )
    }
}

impl StructuredLog for FanInDetected<'_> {
    fn log(&self) {
        tracing::debug!(
            stream = self.stream,
            operator = self.operator,
            predecessors = self.predecessors,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "fan_in",
            span_name = name,
            stream = self.stream,
            operator = self.operator,
        )
    }
}

/// A registered branch is not reachable from the chain root.
///
/// # Log Level
/// `warn!` - Values emitted at the root never reach it
pub struct BranchDetached<'a> {
    pub stream: &'a str,
    pub branch: &'a str,
}

impl Display for BranchDetached<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Branch '{}' on stream '{}' is not reachable from the root operator",
            self.branch, self.stream
        )
    }
}

impl StructuredLog for BranchDetached<'_> {
    fn log(&self) {
        tracing::warn!(stream = self.stream, branch = self.branch, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "branch_detached",
            span_name = name,
            stream = self.stream,
            branch = self.branch,
        )
    }
}

/// Two registered branches share a name; the later one shadows the earlier.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct DuplicateBranchName<'a> {
    pub stream: &'a str,
    pub branch: &'a str,
}

impl Display for DuplicateBranchName<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Branch name '{}' is registered more than once on stream '{}'; the last registration wins",
            self.branch, self.stream
        )
    }
}

impl StructuredLog for DuplicateBranchName<'_> {
    fn log(&self) {
        tracing::debug!(stream = self.stream, branch = self.branch, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "duplicate_branch_name",
            span_name = name,
            stream = self.stream,
            branch = self.branch,
        )
    }
}
