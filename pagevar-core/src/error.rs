//! Error types for pagevar-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error on `settings.json` — includes the file path.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required environment variable was absent after loading.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Convenience constructor for [`SettingsError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SettingsError {
    SettingsError::Io {
        path: path.into(),
        source,
    }
}
