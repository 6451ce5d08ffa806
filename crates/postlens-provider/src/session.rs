//! On-disk cache for the platform session.
//!
//! Holds the last issued session id so later runs can offer it at login
//! instead of starting a fresh session every time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub username: String,
    pub session_id: String,
}

/// JSON file holding one [`StoredSession`].
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached session.
    ///
    /// A missing file is `None`. An unreadable or corrupt file is logged and
    /// also treated as `None`; the next successful login overwrites it.
    #[must_use]
    pub fn load(&self) -> Option<StoredSession> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read session cache");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt session cache");
            })
            .ok()
    }

    /// Writes `session` to the cache file, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::SessionCache`] if the file cannot be written.
    pub fn save(&self, session: &StoredSession) -> Result<(), ProviderError> {
        let body = serde_json::to_string_pretty(session).map_err(|e| ProviderError::SessionCache {
            path: self.path.clone(),
            source: e.into(),
        })?;
        std::fs::write(&self.path, body).map_err(|e| ProviderError::SessionCache {
            path: self.path.clone(),
            source: e,
        })
    }
}
