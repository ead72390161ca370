use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Service description ──
    #[error("service description not found at {path}")]
    MissingFile { path: PathBuf },

    #[error("failed to read service description at {path}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed service description at {path}")]
    MalformedDescription {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("malformed service description: missing required field `{pointer}`")]
    MissingField { pointer: String },

    #[error("malformed service description: `{pointer}` must be {expected}")]
    InvalidField {
        pointer: String,
        expected: &'static str,
    },

    // ── colmena.toml ──
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Error {
    /// Whether this error belongs to the malformed-description category
    /// (bad JSON syntax, or a required key absent or of the wrong shape).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedDescription { .. } | Self::MissingField { .. } | Self::InvalidField { .. }
        )
    }
}
