// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The `Stream` facade: lifecycle, emission, branch lookup and state-store discovery.

mod branch;
mod builder;
mod facade;
mod handle;

pub use branch::BranchOperator;
pub use builder::StreamBuilder;
pub use facade::{Stream, StreamStatus};
pub use handle::EmitHandle;
