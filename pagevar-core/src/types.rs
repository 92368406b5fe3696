//! Domain types for the workspace page store.
//!
//! Blocks are modeled as an explicit tagged variant ([`BlockPayload`]) so the
//! "skip anything that is not a paragraph" rule is enforced by the type
//! system rather than by optional-field chaining. All wire-facing types are
//! serializable via serde + serde_json.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed opaque page identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(pub String);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed opaque block identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub String);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Variable mapping
// ---------------------------------------------------------------------------

/// Run-scoped collected variable assignments, keyed by name.
///
/// Insertion is last-writer-wins in scan order; iteration is name order, so
/// substitution over the map is deterministic.
pub type VariableMap = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A page in the workspace store.
///
/// Pages are enumerated fresh on every synchronization run and never cached
/// between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
}

/// A single rich-text run inside a paragraph block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextRun {
    pub plain_text: String,
}

impl RichTextRun {
    pub fn new(plain_text: impl Into<String>) -> Self {
        Self {
            plain_text: plain_text.into(),
        }
    }
}

/// Paragraph body: ordered rich-text runs plus a display color.
///
/// The engine only inspects and mutates the first run's plain text; the
/// color passes through writes unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphPayload {
    #[serde(default)]
    pub rich_text: Vec<RichTextRun>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Block content, tagged by the store's `type` field.
///
/// Any block type other than `paragraph` decodes to [`BlockPayload::Other`]
/// and is skipped by both synchronization passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockPayload {
    Paragraph { paragraph: ParagraphPayload },
    #[serde(other)]
    Other,
}

/// A content block belonging to exactly one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub payload: BlockPayload,
}

impl Block {
    /// The paragraph body, if this is a paragraph block.
    pub fn paragraph(&self) -> Option<&ParagraphPayload> {
        match &self.payload {
            BlockPayload::Paragraph { paragraph } => Some(paragraph),
            BlockPayload::Other => None,
        }
    }

    /// Plain text of the first rich-text run, if present.
    pub fn first_plain_text(&self) -> Option<&str> {
        self.paragraph()?
            .rich_text
            .first()
            .map(|run| run.plain_text.as_str())
    }
}

/// A database record surfaced by the modified-after poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub last_edited_time: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paragraph_block(id: &str, text: &str) -> Block {
        Block {
            id: BlockId::from(id),
            payload: BlockPayload::Paragraph {
                paragraph: ParagraphPayload {
                    rich_text: vec![RichTextRun::new(text)],
                    color: None,
                },
            },
        }
    }

    #[test]
    fn newtype_display() {
        assert_eq!(PageId::from("p-1").to_string(), "p-1");
        assert_eq!(BlockId::from("b-1").to_string(), "b-1");
    }

    #[test]
    fn paragraph_block_decodes() {
        let block: Block = serde_json::from_value(json!({
            "id": "b-1",
            "type": "paragraph",
            "paragraph": {
                "rich_text": [{ "plain_text": "Hello [name]" }],
                "color": "default"
            }
        }))
        .expect("decode paragraph block");

        assert_eq!(block.first_plain_text(), Some("Hello [name]"));
        assert_eq!(block.paragraph().expect("paragraph").color.as_deref(), Some("default"));
    }

    #[test]
    fn unknown_block_type_decodes_to_other() {
        let block: Block = serde_json::from_value(json!({
            "id": "b-2",
            "type": "bulleted_list_item",
            "bulleted_list_item": { "rich_text": [] }
        }))
        .expect("decode unknown block");

        assert_eq!(block.payload, BlockPayload::Other);
        assert!(block.paragraph().is_none());
        assert!(block.first_plain_text().is_none());
    }

    #[test]
    fn paragraph_without_runs_has_no_text() {
        let block: Block = serde_json::from_value(json!({
            "id": "b-3",
            "type": "paragraph",
            "paragraph": { "rich_text": [] }
        }))
        .expect("decode empty paragraph");

        assert!(block.paragraph().is_some());
        assert!(block.first_plain_text().is_none());
    }

    #[test]
    fn first_plain_text_uses_only_first_run() {
        let mut block = paragraph_block("b-4", "first");
        if let BlockPayload::Paragraph { paragraph } = &mut block.payload {
            paragraph.rich_text.push(RichTextRun::new("second"));
        }
        assert_eq!(block.first_plain_text(), Some("first"));
    }

    #[test]
    fn variable_map_iterates_in_name_order() {
        let mut vars = VariableMap::new();
        vars.insert("zulu".to_string(), "1".to_string());
        vars.insert("alpha".to_string(), "2".to_string());
        let names: Vec<_> = vars.keys().cloned().collect();
        assert_eq!(names, vec!["alpha", "zulu"]);
    }

    #[test]
    fn resource_decodes_timestamp() {
        let resource: Resource = serde_json::from_value(json!({
            "id": "r-1",
            "last_edited_time": "2024-05-01T12:00:00Z"
        }))
        .expect("decode resource");
        assert_eq!(resource.id, "r-1");
        assert_eq!(resource.last_edited_time.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }
}
