//! Modified-after polling with an explicit watermark.

use chrono::{DateTime, Utc};

use pagevar_client::{PageStore, StoreError};
use pagevar_core::types::Resource;

/// Outcome of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// No records modified since the watermark; watermark unchanged.
    NoUpdates,
    /// At least one modified record; watermark advanced to "now".
    Updated { resources: Vec<Resource> },
}

/// Watermark-holding poller. One instance per process.
///
/// The watermark starts at the Unix epoch and is never persisted, so a
/// restart re-notifies everything on its first hit. A record modified
/// between query start and watermark advance can be seen again next cycle;
/// at-least-once delivery is acceptable for this job.
#[derive(Debug, Clone)]
pub struct UpdatePoller {
    watermark: DateTime<Utc>,
}

impl Default for UpdatePoller {
    fn default() -> Self {
        Self::new(DateTime::UNIX_EPOCH)
    }
}

impl UpdatePoller {
    pub fn new(watermark: DateTime<Utc>) -> Self {
        Self { watermark }
    }

    pub fn watermark(&self) -> DateTime<Utc> {
        self.watermark
    }

    /// Query for records modified strictly after the watermark.
    ///
    /// Query failure propagates and leaves the watermark untouched. On any
    /// hit the watermark advances to the current time — not to the latest
    /// record's timestamp.
    pub async fn poll_once<S: PageStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<PollOutcome, StoreError> {
        let resources = store.query_modified_after(self.watermark).await?;

        if resources.is_empty() {
            tracing::info!(watermark = %self.watermark, "no updates found");
            return Ok(PollOutcome::NoUpdates);
        }

        self.watermark = Utc::now();
        tracing::info!(
            count = resources.len(),
            watermark = %self.watermark,
            "updated records found"
        );
        Ok(PollOutcome::Updated { resources })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
