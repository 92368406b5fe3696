//! reqwest-backed [`PageStore`] implementation.
//!
//! Owns everything the engine treats as collaborator concerns: bearer-token
//! auth, JSON bodies, and the sequential cursor loop that exhausts page
//! discovery before returning.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use pagevar_core::settings::Settings;
use pagevar_core::types::{Block, BlockId, Page, PageId, Resource, RichTextRun};

use crate::error::StoreError;
use crate::store::PageStore;
use crate::wire::{
    BlockChildrenResponse, DatabaseQueryRequest, DatabaseQueryResponse, ParagraphUpdate,
    SearchFilter, SearchRequest, SearchResponse, UpdateBlockRequest,
};

/// Page size for cursor-paginated listings.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// HTTP client for the workspace REST API.
#[derive(Debug, Clone)]
pub struct WorkspaceClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
    database_id: Option<String>,
}

impl WorkspaceClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: default_http_client(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_token: settings.api_token.clone(),
            database_id: settings.database_id.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = request.bearer_auth(&self.api_token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        self.send_json(self.http.post(self.url(path)).json(body)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        self.send_json(self.http.get(self.url(path))).await
    }

    async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        self.send_json(self.http.patch(self.url(path)).json(body)).await
    }
}

fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("pagevar/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap() // panics for the same reasons Client::new() would
}

#[async_trait]
impl PageStore for WorkspaceClient {
    async fn list_all_pages(&self) -> Result<Vec<Page>, StoreError> {
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = SearchRequest {
                start_cursor: cursor.take(),
                page_size: DEFAULT_PAGE_SIZE,
                filter: SearchFilter::pages(),
            };
            let response: SearchResponse = self.post_json("/v1/search", &body).await?;
            pages.extend(response.results);

            if !response.has_more {
                break;
            }
            // A truthy has_more with no cursor would loop forever; treat it
            // as exhausted.
            let Some(next) = response.next_cursor else { break };
            cursor = Some(next);
        }

        tracing::debug!(pages = pages.len(), "page discovery complete");
        Ok(pages)
    }

    async fn list_blocks(&self, page_id: &PageId) -> Result<Vec<Block>, StoreError> {
        let response: BlockChildrenResponse = self
            .get_json(&format!("/v1/blocks/{page_id}/children"))
            .await?;
        Ok(response.results)
    }

    async fn update_paragraph_block(
        &self,
        block_id: &BlockId,
        rich_text: Vec<RichTextRun>,
        color: Option<String>,
    ) -> Result<(), StoreError> {
        let body = UpdateBlockRequest {
            paragraph: ParagraphUpdate {
                rich_text: rich_text.into_iter().map(Into::into).collect(),
                color,
            },
        };
        let _: serde_json::Value = self
            .patch_json(&format!("/v1/blocks/{block_id}"), &body)
            .await?;
        tracing::debug!(block = %block_id, "block updated");
        Ok(())
    }

    async fn query_modified_after(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<Resource>, StoreError> {
        let Some(database_id) = &self.database_id else {
            return Err(StoreError::MissingDatabaseId);
        };
        let body = DatabaseQueryRequest::modified_after(since);
        let response: DatabaseQueryResponse = self
            .post_json(&format!("/v1/databases/{database_id}/query"), &body)
            .await?;
        Ok(response.results)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> Settings {
        Settings {
            api_token: "secret".to_string(),
            base_url: base_url.to_string(),
            database_id: None,
        }
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = WorkspaceClient::new(&settings("https://store.example/"));
        assert_eq!(client.url("/v1/search"), "https://store.example/v1/search");
    }

    #[tokio::test]
    async fn modified_after_requires_database_id() {
        let client = WorkspaceClient::new(&settings("https://store.example"));
        let err = client
            .query_modified_after(Utc::now())
            .await
            .expect_err("no database id configured");
        assert!(matches!(err, StoreError::MissingDatabaseId));
    }
}
