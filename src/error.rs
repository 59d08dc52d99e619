//! Errors raised while setting a pipeline up.
//!
//! Evaluation itself never fails: every problem a handler meets during a
//! check ends up as a rejection. These errors only come from loading and
//! validating pipeline definitions.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("handler #{index} ({kind}): {message}")]
    InvalidHandler {
        index: usize,
        kind: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
