// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operator graph traversal and analysis.
//!
//! * `visitor` - the cycle-safe walk shared by telemetry propagation and state-store
//!   discovery
//! * `topology` - an arena snapshot of the reachable chain with index-based edges, used
//!   to tell real cycles apart from intentional fan-in

mod topology;
mod visitor;

pub use topology::OperatorGraph;
pub use visitor::{walk, GraphVisitor, OperatorId};
