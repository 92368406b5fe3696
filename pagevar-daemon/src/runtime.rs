//! Poll loop runtime: tokio interval + ctrl-c shutdown.

use std::time::Duration;

use pagevar_client::{PageStore, WorkspaceClient};
use pagevar_core::settings::Settings;
use pagevar_sync::{PollOutcome, UpdatePoller};

use crate::error::{io_err, DaemonError};

/// Seconds between poll cycles unless overridden.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Build a multi-thread runtime and run the poll loop until ctrl-c.
pub fn start_blocking(settings: Settings, interval: Duration) -> Result<(), DaemonError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    let client = WorkspaceClient::new(&settings);
    runtime.block_on(run(client, interval))
}

/// Run the poll loop: first tick immediate, then every `interval`.
///
/// A failed cycle is logged and the watermark stays put — the next tick
/// simply retries; the loop only exits on ctrl-c.
pub async fn run<S: PageStore>(store: S, interval: Duration) -> Result<(), DaemonError> {
    let mut poller = UpdatePoller::default();
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match poller.poll_once(&store).await {
                    Ok(PollOutcome::Updated { resources }) => {
                        for resource in &resources {
                            tracing::info!(
                                id = %resource.id,
                                last_edited = %resource.last_edited_time,
                                "record modified",
                            );
                        }
                    }
                    Ok(PollOutcome::NoUpdates) => {}
                    Err(err) => {
                        tracing::error!(error = %err, "poll cycle failed");
                    }
                }
            }
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => {
                        tracing::info!("received ctrl-c, stopping poller");
                        return Ok(());
                    }
                    Err(err) => return Err(io_err("ctrl-c handler", err)),
                }
            }
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use pagevar_client::StoreError;
    use pagevar_core::types::{Block, BlockId, Page, PageId, Resource, RichTextRun};

    use super::*;

    /// Fake store that counts modified-after queries.
    #[derive(Default, Clone)]
    struct CountingStore {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl PageStore for CountingStore {
        async fn list_all_pages(&self) -> Result<Vec<Page>, StoreError> {
            Ok(vec![])
        }

        async fn list_blocks(&self, _page_id: &PageId) -> Result<Vec<Block>, StoreError> {
            Ok(vec![])
        }

        async fn update_paragraph_block(
            &self,
            _block_id: &BlockId,
            _rich_text: Vec<RichTextRun>,
            _color: Option<String>,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn query_modified_after(
            &self,
            _since: DateTime<Utc>,
        ) -> Result<Vec<Resource>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Api {
                    status: 500,
                    message: "scripted failure".to_string(),
                });
            }
            Ok(vec![])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn poll_loop_fires_on_each_tick() {
        let store = CountingStore::default();
        let calls = store.calls.clone();

        let handle = tokio::spawn(run(store, Duration::from_secs(60)));

        // First tick is immediate.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn poll_loop_survives_cycle_failures() {
        let store = CountingStore {
            fail: true,
            ..CountingStore::default()
        };
        let calls = store.calls.clone();

        let handle = tokio::spawn(run(store, Duration::from_secs(60)));

        tokio::time::sleep(Duration::from_secs(121)).await;
        // Every cycle failed, and the loop kept ticking anyway.
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        handle.abort();
    }
}
