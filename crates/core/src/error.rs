//! Error types for configuration and policy resolution

use std::path::PathBuf;
use thiserror::Error;

/// Errors detected while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{value}: '{field}' is invalid value ({reason})")]
    InvalidInterval {
        field: String,
        value: String,
        reason: &'static str,
    },

    #[error("{value}: '{field}' is invalid value (either \"write\", \"create\", \"remove\", \"rename\", \"chmod\")")]
    InvalidTriggerKind { field: String, value: String },

    #[error("{value}: '{field}' is invalid value (either \"self\", \"write\", \"create\", \"remove\", \"rename\", \"chmod\", optionally prefixed with '!')")]
    InvalidTriggerSpec { field: String, value: String },

    #[error("{value}: '{field}' is invalid value (\"ignore\" or \"cancel\" or \"retry\")")]
    InvalidDisposition { field: String, value: String },

    #[error("'{field}' is empty")]
    Empty { field: String },

    #[error("No actions were defined")]
    NoActions,

    #[error("Action '{name}' is defined more than once")]
    DuplicateAction { name: String },

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised by the policy resolver for malformed interference rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Can't convert '{0}' to an event kind")]
    InvalidTriggerKind(String),

    #[error("{0}: invalid 'interval_action[].do'")]
    InvalidDisposition(String),
}
