// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] for the structured event and its matching span.
//!
//! # Organization
//!
//! * `stream` - Stream lifecycle and emission events
//! * `graph` - Operator graph traversal, telemetry propagation and topology analysis
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_streamwood::observability::messages::stream::StreamStarted;
//! use the_streamwood::observability::messages::StructuredLog;
//!
//! let msg = StreamStarted {
//!     stream: "orders",
//!     source_driven: false,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod graph;
pub mod stream;

/// A log message that knows its level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event at its documented level.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
