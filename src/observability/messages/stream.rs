// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for stream lifecycle and emission events.
//!
//! This module contains message types for logging events related to:
//! * Stream construction
//! * Start / stop transitions
//! * Emission dispatch, rejection and cancellation

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Stream constructed and telemetry propagated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct StreamCreated<'a> {
    pub stream: &'a str,
    pub root: &'a str,
    pub branch_count: usize,
}

impl Display for StreamCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stream '{}' created: root='{}', branches={}",
            self.stream, self.root, self.branch_count
        )
    }
}

impl StructuredLog for StreamCreated<'_> {
    fn log(&self) {
        tracing::info!(
            stream = self.stream,
            root = self.root,
            branch_count = self.branch_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "stream_created",
            span_name = name,
            stream = self.stream,
            root = self.root,
            branch_count = self.branch_count,
        )
    }
}

/// Stream transitioned to running.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_streamwood::observability::messages::stream::StreamStarted;
///
/// let msg = StreamStarted {
///     stream: "orders",
///     source_driven: true,
/// };
///
/// assert_eq!(msg.to_string(), "Stream 'orders' started (source-driven)");
/// ```
pub struct StreamStarted<'a> {
    pub stream: &'a str,
    pub source_driven: bool,
}

impl Display for StreamStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.source_driven {
            write!(f, "Stream '{}' started (source-driven)", self.stream)
        } else {
            write!(f, "Stream '{}' started", self.stream)
        }
    }
}

impl StructuredLog for StreamStarted<'_> {
    fn log(&self) {
        tracing::info!(
            stream = self.stream,
            source_driven = self.source_driven,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "stream_started",
            span_name = name,
            stream = self.stream,
            source_driven = self.source_driven,
        )
    }
}

/// Start does not drive a source adapter's pull loop; the adapter runs it on its own.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct SourceLoopNotStarted<'a> {
    pub stream: &'a str,
    pub source_operator: &'a str,
}

impl Display for SourceLoopNotStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stream '{}' does not start the pull loop of source '{}'",
            self.stream, self.source_operator
        )
    }
}

impl StructuredLog for SourceLoopNotStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            stream = self.stream,
            source_operator = self.source_operator,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "source_loop_not_started",
            span_name = name,
            stream = self.stream,
            source_operator = self.source_operator,
        )
    }
}

/// Stream transitioned to not running.
///
/// # Log Level
/// `info!` - Important operational event
pub struct StreamStopped<'a> {
    pub stream: &'a str,
    pub source_stopped: Option<&'a str>,
}

impl Display for StreamStopped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.source_stopped {
            Some(source) => write!(
                f,
                "Stream '{}' stopped, source '{}' released",
                self.stream, source
            ),
            None => write!(f, "Stream '{}' stopped", self.stream),
        }
    }
}

impl StructuredLog for StreamStopped<'_> {
    fn log(&self) {
        tracing::info!(
            stream = self.stream,
            source_stopped = self.source_stopped,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "stream_stopped",
            span_name = name,
            stream = self.stream,
            source_stopped = self.source_stopped,
        )
    }
}

/// Emission refused because of the stream's state or shape.
///
/// # Log Level
/// `warn!` - Caller misuse
pub struct EmitRejected<'a> {
    pub stream: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for EmitRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Emission rejected on stream '{}': {}", self.stream, self.error)
    }
}

impl StructuredLog for EmitRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            stream = self.stream,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "emit_rejected",
            span_name = name,
            stream = self.stream,
            error = %self.error,
        )
    }
}

/// Async emission dropped because its cancellation token fired before scheduling.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct EmitCancelled<'a> {
    pub stream: &'a str,
    pub root: &'a str,
}

impl Display for EmitCancelled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Emission to '{}' on stream '{}' cancelled before scheduling",
            self.root, self.stream
        )
    }
}

impl StructuredLog for EmitCancelled<'_> {
    fn log(&self) {
        tracing::debug!(
            stream = self.stream,
            root = self.root,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "emit_cancelled",
            span_name = name,
            stream = self.stream,
            root = self.root,
        )
    }
}

/// Value handed to the chain root, either inline or on a worker.
///
/// # Log Level
/// `trace!` - Per-value event
pub struct EmitDispatched<'a> {
    pub stream: &'a str,
    pub root: &'a str,
    pub asynchronous: bool,
}

impl Display for EmitDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mode = if self.asynchronous { "async" } else { "sync" };
        write!(
            f,
            "Dispatching {} emission on stream '{}' to root '{}'",
            mode, self.stream, self.root
        )
    }
}

impl StructuredLog for EmitDispatched<'_> {
    fn log(&self) {
        tracing::trace!(
            stream = self.stream,
            root = self.root,
            asynchronous = self.asynchronous,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "emit",
            span_name = name,
            stream = self.stream,
            root = self.root,
            asynchronous = self.asynchronous,
        )
    }
}

/// An emission finished with an operator failure.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct EmitFailed<'a> {
    pub stream: &'a str,
    pub operator: &'a str,
    pub error: &'a dyn std::fmt::Display,
}

impl Display for EmitFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Emission on stream '{}' failed in operator '{}': {}",
            self.stream, self.operator, self.error
        )
    }
}

impl StructuredLog for EmitFailed<'_> {
    fn log(&self) {
        tracing::error!(
            stream = self.stream,
            operator = self.operator,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "emit_failed",
            span_name = name,
            stream = self.stream,
            operator = self.operator,
            error = %self.error,
        )
    }
}
