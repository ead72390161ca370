use std::path::{Path, PathBuf};

use crate::error::PublishError;
use crate::sink::{PublishSink, PublishedDefinition};

/// Default zenoh config file name, looked up next to the running executable.
pub const ZENOH_CONFIG_FILE: &str = "zenoh_config.json5";

/// Publishes the definition with a single zenoh `put`.
///
/// A session is opened per publish and closed afterwards.
#[derive(Debug, Clone)]
pub struct ZenohSink {
    config_path: PathBuf,
}

impl ZenohSink {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Use `path` if given, else `zenoh_config.json5` beside the executable.
    pub fn from_config_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(path),
            None => Self::new(default_config_path()),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn load_config(&self) -> Result<zenoh::Config, PublishError> {
        tracing::debug!(path = %self.config_path.display(), "loading zenoh config");
        zenoh::Config::from_file(&self.config_path).map_err(|e| PublishError::ZenohConfig {
            path: self.config_path.clone(),
            detail: e.to_string(),
        })
    }
}

impl PublishSink for ZenohSink {
    async fn publish(&self, definition: &PublishedDefinition) -> Result<(), PublishError> {
        let config = self.load_config()?;

        let session = zenoh::open(config)
            .await
            .map_err(|e| PublishError::ZenohSession {
                detail: e.to_string(),
            })?;

        session
            .put(definition.key.as_str(), definition.payload.clone())
            .await
            .map_err(|e| PublishError::ZenohPut {
                key: definition.key.clone(),
                detail: e.to_string(),
            })?;
        tracing::debug!(key = %definition.key, bytes = definition.payload.len(), "zenoh put done");

        if let Err(e) = session.close().await {
            tracing::warn!(error = %e, "failed to close zenoh session after put");
        }

        Ok(())
    }
}

/// `zenoh_config.json5` in the directory of the current executable.
///
/// Falls back to the working directory if the executable path is unknown.
pub fn default_config_path() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(|dir| dir.join(ZENOH_CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(ZENOH_CONFIG_FILE)),
        Err(e) => {
            tracing::warn!(error = %e, "cannot resolve executable path; using ./{ZENOH_CONFIG_FILE}");
            PathBuf::from(ZENOH_CONFIG_FILE)
        }
    }
}
