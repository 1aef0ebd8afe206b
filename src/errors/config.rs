// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for loading stream options from disk.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML options: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension is not one of `yaml`, `yml`, `json` or `toml`.
    #[error("Unsupported options format for '{}'", .0.display())]
    UnsupportedFormat(PathBuf),
}
