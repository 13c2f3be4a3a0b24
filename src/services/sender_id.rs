//! Fallback lookup of the push sender id.
//!
//! When a configuration source does not name a sender id, the loader asks a
//! [`SenderIdProvider`]. On device this is the messaging platform's default
//! app options; here the same value is read from `google-services.json`
//! (`project_info.project_number`).

use crate::error::SenderIdError;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;

/// Supplies the push sender id when the configuration source lacks one.
#[cfg_attr(test, mockall::automock)]
pub trait SenderIdProvider {
    fn sender_id(&self) -> Result<String, SenderIdError>;
}

/// Reads the sender id from a `google-services.json` file on every lookup.
#[derive(Debug, Clone)]
pub struct GoogleServicesSenderId {
    path: Utf8PathBuf,
}

#[derive(Debug, Deserialize)]
struct GoogleServices {
    project_info: Option<ProjectInfo>,
}

#[derive(Debug, Deserialize)]
struct ProjectInfo {
    project_number: Option<String>,
}

impl GoogleServicesSenderId {
    pub fn from_path<P: AsRef<Utf8Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl SenderIdProvider for GoogleServicesSenderId {
    fn sender_id(&self) -> Result<String, SenderIdError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| SenderIdError::Io {
            path: self.path.clone(),
            source,
        })?;

        let services: GoogleServices =
            serde_json::from_str(&contents).map_err(|source| SenderIdError::Parse {
                path: self.path.clone(),
                source,
            })?;

        services
            .project_info
            .and_then(|info| info.project_number)
            .filter(|number| !number.is_empty())
            .ok_or_else(|| SenderIdError::Missing(self.path.clone()))
    }
}

/// Provider returning a fixed sender id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSenderId(pub String);

impl SenderIdProvider for StaticSenderId {
    fn sender_id(&self) -> Result<String, SenderIdError> {
        Ok(self.0.clone())
    }
}

/// Provider for hosts without a messaging platform; every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSenderId;

impl SenderIdProvider for NoSenderId {
    fn sender_id(&self) -> Result<String, SenderIdError> {
        Err(SenderIdError::NotConfigured)
    }
}
