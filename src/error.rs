use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised when finalizing a [`SdkConfigBuilder`](crate::models::SdkConfigBuilder).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required field {0} is not set")]
    MissingField(&'static str),

    #[error("Required field {0} is empty")]
    EmptyField(&'static str),

    #[error("Invalid server url {url}: {reason}")]
    InvalidServerUrl { url: String, reason: String },
}

/// Failures while reading a configuration source.
///
/// These never escape the loader: they are logged and the partially
/// populated builder is kept.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Configuration file not found: {0}")]
    NotFound(Utf8PathBuf),

    #[error("Can not read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON configuration root is not an object")]
    NotAnObject,

    #[error("No value for {0}")]
    MissingKey(&'static str),

    #[error("Malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },
}

/// Failures looking up the push sender id from the platform fallback.
#[derive(Error, Debug)]
pub enum SenderIdError {
    #[error("No sender id provider is configured")]
    NotConfigured,

    #[error("Can not read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed google services file {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Sender id is missing from {0}")]
    Missing(Utf8PathBuf),
}
