//! Wire shapes for the workspace REST API.
//!
//! Request payloads serialize exactly what the store expects; responses
//! deserialize only the fields the engine consumes (serde ignores the rest).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pagevar_core::types::{Block, Page, Resource, RichTextRun};

// ---------------------------------------------------------------------------
// Search (page discovery)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) start_cursor: Option<String>,
    pub(crate) page_size: u32,
    pub(crate) filter: SearchFilter,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchFilter {
    pub(crate) value: &'static str,
    pub(crate) property: &'static str,
}

impl SearchFilter {
    pub(crate) fn pages() -> Self {
        Self {
            value: "page",
            property: "object",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub(crate) results: Vec<Page>,
    pub(crate) has_more: bool,
    pub(crate) next_cursor: Option<String>,
}

// ---------------------------------------------------------------------------
// Block listing and updates
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct BlockChildrenResponse {
    pub(crate) results: Vec<Block>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBlockRequest {
    pub(crate) paragraph: ParagraphUpdate,
}

#[derive(Debug, Serialize)]
pub(crate) struct ParagraphUpdate {
    pub(crate) rich_text: Vec<RichTextItemRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) color: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RichTextItemRequest {
    #[serde(rename = "type")]
    pub(crate) kind: &'static str,
    pub(crate) text: TextContent,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextContent {
    pub(crate) content: String,
}

impl From<RichTextRun> for RichTextItemRequest {
    fn from(run: RichTextRun) -> Self {
        Self {
            kind: "text",
            text: TextContent {
                content: run.plain_text,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Database query (poller)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct DatabaseQueryRequest {
    pub(crate) filter: LastEditedFilter,
}

#[derive(Debug, Serialize)]
pub(crate) struct LastEditedFilter {
    pub(crate) property: &'static str,
    pub(crate) date: DateAfter,
}

#[derive(Debug, Serialize)]
pub(crate) struct DateAfter {
    pub(crate) after: DateTime<Utc>,
}

impl DatabaseQueryRequest {
    pub(crate) fn modified_after(after: DateTime<Utc>) -> Self {
        Self {
            filter: LastEditedFilter {
                property: "last_edited_time",
                date: DateAfter { after },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseQueryResponse {
    pub(crate) results: Vec<Resource>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
