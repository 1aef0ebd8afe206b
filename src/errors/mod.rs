// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod graph;
mod stream;

pub use config::ConfigError;
pub use graph::GraphError;
pub use stream::{StreamError, StreamResult};
