//! Error types for configuration resolution and API reporting.

use std::path::PathBuf;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors raised while talking to the report API.
///
/// Only begin-run and finish-run surface these to the caller. Per-test
/// failures are logged and swallowed by the reporter.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("HTTP request to the report API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cannot join {path:?} onto report API URL {base:?}")]
    InvalidUrl { base: String, path: String },

    #[error("Report API call {call} failed with status {status}: {body}")]
    Status {
        call: &'static str,
        status: u16,
        body: String,
    },

    #[error("Report API call {call} returned no {field:?}: {body}")]
    MissingField {
        call: &'static str,
        field: &'static str,
        body: String,
    },

    #[error("Report API call {call} has an invalid JSON body: {source}")]
    Json {
        call: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot {operation} while session is {state}")]
    OutOfOrder {
        operation: &'static str,
        state: crate::runner::SessionState,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
