// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // stream options + loaders
pub mod errors;     // error handling
pub mod graph;      // chain traversal and topology
pub mod observability;
pub mod stream;     // Stream facade, branches, builder
pub mod traits;     // operator capability contract

#[cfg(test)]
pub(crate) mod stubs;

pub use errors::{StreamError, StreamResult};
pub use stream::{BranchOperator, EmitHandle, Stream, StreamBuilder, StreamStatus};
