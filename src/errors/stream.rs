// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by the `Stream` facade.
//!
//! All variants are returned to the caller at the point of violation; the engine never
//! retries or swallows them.

use thiserror::Error;

use crate::errors::GraphError;

#[derive(Error, Debug)]
pub enum StreamError {
    /// Emission attempted while the stream is not running.
    #[error("Stream '{stream}' is not running")]
    NotRunning { stream: String },

    /// Emission attempted against a chain rooted at a pull-based source.
    #[error("Stream '{stream}' is driven by source operator '{source_operator}' and does not accept manual emission")]
    SourceDriven {
        stream: String,
        source_operator: String,
    },

    /// The cancellation token was already triggered when `emit_async` was called.
    #[error("Emission on stream '{stream}' was cancelled before it was scheduled")]
    Cancelled { stream: String },

    /// `emit_async` was called outside a tokio runtime and no handle was configured.
    #[error("No tokio runtime available to schedule emission on stream '{stream}'")]
    RuntimeUnavailable { stream: String },

    /// An operator reported a failure while processing a value.
    #[error("Operator '{operator}' failed: {source}")]
    Operator {
        operator: String,
        #[source]
        source: anyhow::Error,
    },

    /// The worker running an async emission panicked or was torn down.
    #[error("Emission worker failed: {0}")]
    Worker(String),

    /// `StreamBuilder::build` was called without a root operator.
    #[error("Stream '{stream}' has no root operator")]
    MissingRoot { stream: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl StreamError {
    /// True for the invalid-state family: emitting while stopped or into a source-driven chain.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            StreamError::NotRunning { .. } | StreamError::SourceDriven { .. }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, StreamError::Cancelled { .. })
    }
}

pub type StreamResult<T> = Result<T, StreamError>;
