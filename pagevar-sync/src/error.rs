//! Error types for pagevar-sync.

use thiserror::Error;

use pagevar_client::StoreError;

/// All errors that can arise from a synchronization run.
///
/// Every failure is fail-fast and whole-run-aborting: there is no retry,
/// backoff, or partial-failure accounting. Blocks already written before the
/// failure stay written.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A collaborator fetch or write failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
