// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Structural problems found while analysing an operator chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The chain loops back on itself. `cycle` lists operator names, first and last equal.
    #[error("Cyclic operator chain detected: {}", .cycle.join(" -> "))]
    CyclicChain { cycle: Vec<String> },
}
