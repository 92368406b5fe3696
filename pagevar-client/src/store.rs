//! Core-facing collaborator interface for the workspace store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pagevar_core::types::{Block, BlockId, Page, PageId, Resource, RichTextRun};

use crate::error::StoreError;

/// Abstract page store: page listing, block access, block updates, and the
/// modified-after query used by the poller.
///
/// Implementations own transport, auth, and pagination. Callers await these
/// operations sequentially — the engine never issues two store calls
/// concurrently, so implementations need no internal ordering guarantees.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Every page in the workspace. Exhausts pagination internally before
    /// returning.
    async fn list_all_pages(&self) -> Result<Vec<Page>, StoreError>;

    /// All direct child blocks of `page_id`.
    async fn list_blocks(&self, page_id: &PageId) -> Result<Vec<Block>, StoreError>;

    /// Replace a paragraph block's rich text, passing `color` through
    /// unchanged. Failure is an error, never a boolean.
    async fn update_paragraph_block(
        &self,
        block_id: &BlockId,
        rich_text: Vec<RichTextRun>,
        color: Option<String>,
    ) -> Result<(), StoreError>;

    /// Database records modified strictly after `since`.
    async fn query_modified_after(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<Resource>, StoreError>;
}
