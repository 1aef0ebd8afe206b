/// Stream name used when neither the builder nor the options provide one
pub const DEFAULT_STREAM_NAME: &str = "stream";
/// Environment variable consulted by `init_tracing` before the configured filter
pub const LOG_FILTER_ENV: &str = "STREAMWOOD_LOG";
/// Log filter used when the options do not set one
pub const DEFAULT_LOG_FILTER: &str = "info";
