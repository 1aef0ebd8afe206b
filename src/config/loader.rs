// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::DEFAULT_LOG_FILTER;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Options applied by `StreamBuilder` when assembling a stream.
///
/// Every field is optional, so an empty document yields the defaults.
///
/// # Fields
/// * `name` - Overrides the name given to the builder (optional)
/// * `cycle_policy` - What to do when the chain loops back on itself (defaults to `warn`)
/// * `telemetry` - Telemetry provider selection when none is injected explicitly
/// * `logging` - Default filter for `init_tracing`
///
/// # Example
/// ```yaml
/// name: orders
/// cycle_policy: reject
/// telemetry:
///   enabled: true
///   backend: tracing
/// logging:
///   filter: "the_streamwood=debug"
/// ```
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct StreamOptions {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cycle_policy: CyclePolicy,
    #[serde(default)]
    pub telemetry: TelemetryOptions,
    #[serde(default)]
    pub logging: LoggingOptions,
}

/// Handling of a cyclic operator chain at build time.
///
/// Traversals terminate on cycles regardless of policy; the policy only decides whether
/// building such a stream is allowed.
///
/// # Variants
/// * `Allow` - Build silently
/// * `Warn` - Build and log the cycle path
/// * `Reject` - Fail with `GraphError::CyclicChain`
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    Allow,
    #[default]
    Warn,
    Reject,
}

/// Telemetry provider selection.
///
/// Ignored when a provider is passed to the builder directly.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TelemetryOptions {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub backend: TelemetryBackend,
}

impl Default for TelemetryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: TelemetryBackend::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryBackend {
    #[default]
    Noop,
    Tracing,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingOptions {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Load stream options, picking the parser from the file extension.
///
/// `.yaml` / `.yml` use `serde_yaml`, `.json` uses `serde_json`, `.toml` uses `toml`.
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<StreamOptions, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match extension.as_deref() {
        Some("yaml") | Some("yml") => parse_yaml(&content),
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Parse options from a YAML document. An empty document yields the defaults.
pub fn parse_yaml(content: &str) -> Result<StreamOptions, ConfigError> {
    if content.trim().is_empty() {
        return Ok(StreamOptions::default());
    }
    Ok(serde_yaml::from_str(content)?)
}
