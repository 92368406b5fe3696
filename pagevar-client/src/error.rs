//! Error types for pagevar-client.

use thiserror::Error;

/// All errors that can arise from workspace store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure (connection refused, timeout, TLS) or a
    /// response body that did not decode as the expected shape.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Modified-after queries need a configured database id.
    #[error("no database id configured; set PAGEVAR_DATABASE_ID")]
    MissingDatabaseId,
}
