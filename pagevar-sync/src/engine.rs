//! Two-pass synchronization engine.
//!
//! ## Run shape
//!
//! 1. Discovery: enumerate every page (pagination is a client concern).
//! 2. Collection pass: scan each page's paragraph blocks for assignment
//!    markers and merge them into the run-scoped [`VariableMap`] —
//!    last-writer-wins in scan order across pages.
//! 3. Application pass: re-fetch each page's blocks and rewrite every
//!    paragraph block's first rich-text run with the completed map. Only
//!    blocks whose text actually changed are written back.
//!
//! Re-running over untouched pages is a no-op: markers were stripped during
//! application, so the collected map repeats and placeholders that were
//! already expanded no longer exist in the text.

use pagevar_client::PageStore;
use pagevar_core::types::{Block, BlockId, VariableMap};
use pagevar_grammar::{apply_variables, parse_assignment};

use crate::error::SyncError;

// ---------------------------------------------------------------------------
// Run result
// ---------------------------------------------------------------------------

/// Outcome of an individual block rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Block text changed and was written back.
    Written { block_id: BlockId },
    /// Rewrite produced identical text; no write was issued.
    Unchanged { block_id: BlockId },
    /// Dry-run mode: the block *would* have been written.
    WouldWrite { block_id: BlockId },
}

/// Summary of one synchronization run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub pages: usize,
    pub variables: VariableMap,
    pub writes: Vec<WriteOutcome>,
}

impl SyncReport {
    pub fn written(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, WriteOutcome::Written { .. } | WriteOutcome::WouldWrite { .. }))
            .count()
    }

    pub fn unchanged(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, WriteOutcome::Unchanged { .. }))
            .count()
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run one full synchronization: discovery, collection pass, application
/// pass.
///
/// Any fetch or write failure aborts the entire run by propagating upward;
/// blocks already written in this run stay written. With `dry_run`, no
/// writes are issued and changed blocks are reported as
/// [`WriteOutcome::WouldWrite`].
pub async fn run<S: PageStore + ?Sized>(
    store: &S,
    dry_run: bool,
) -> Result<SyncReport, SyncError> {
    let pages = store.list_all_pages().await?;
    tracing::info!(pages = pages.len(), "discovered pages");

    let mut variables = VariableMap::new();
    for page in &pages {
        let blocks = store.list_blocks(&page.id).await?;
        collect_assignments(&blocks, &mut variables);
    }
    tracing::info!(variables = variables.len(), "collected variable assignments");

    let mut writes = Vec::new();
    for page in &pages {
        let blocks = store.list_blocks(&page.id).await?;
        for block in blocks {
            if let Some(outcome) = rewrite_block(store, &block, &variables, dry_run).await? {
                writes.push(outcome);
            }
        }
    }

    Ok(SyncReport {
        pages: pages.len(),
        variables,
        writes,
    })
}

/// Merge every assignment found in `blocks` into `variables`.
///
/// Scan order is block order; a name assigned twice keeps the later value.
pub fn collect_assignments(blocks: &[Block], variables: &mut VariableMap) {
    for block in blocks {
        let Some(text) = block.first_plain_text() else {
            continue;
        };
        if let Some(assignment) = parse_assignment(text) {
            variables.insert(assignment.name, assignment.value);
        }
    }
}

/// Rewrite a single block with the completed map.
///
/// Non-paragraph blocks and paragraphs with no rich-text runs are skipped
/// entirely (`None`). The existing paragraph color passes through the write
/// unchanged.
async fn rewrite_block<S: PageStore + ?Sized>(
    store: &S,
    block: &Block,
    variables: &VariableMap,
    dry_run: bool,
) -> Result<Option<WriteOutcome>, SyncError> {
    let Some(paragraph) = block.paragraph() else {
        return Ok(None);
    };
    let Some(first) = paragraph.rich_text.first() else {
        return Ok(None);
    };

    let rewritten = apply_variables(&first.plain_text, variables);
    if rewritten == first.plain_text {
        tracing::debug!(block = %block.id, "unchanged");
        return Ok(Some(WriteOutcome::Unchanged {
            block_id: block.id.clone(),
        }));
    }

    if dry_run {
        tracing::info!(block = %block.id, "[dry-run] would rewrite");
        return Ok(Some(WriteOutcome::WouldWrite {
            block_id: block.id.clone(),
        }));
    }

    let mut rich_text = paragraph.rich_text.clone();
    rich_text[0].plain_text = rewritten;
    store
        .update_paragraph_block(&block.id, rich_text, paragraph.color.clone())
        .await?;
    tracing::info!(block = %block.id, "rewrote block");
    Ok(Some(WriteOutcome::Written {
        block_id: block.id.clone(),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pagevar_core::types::{BlockPayload, ParagraphPayload, RichTextRun};

    use super::*;

    fn paragraph(id: &str, text: &str) -> Block {
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

    fn other(id: &str) -> Block {
        Block {
            id: BlockId::from(id),
            payload: BlockPayload::Other,
        }
    }

    #[test]
    fn collects_assignments_from_paragraphs() {
        let blocks = vec![
            paragraph("b-1", "Hello [name = 'Ann']"),
            other("b-2"),
            paragraph("b-3", "no marker"),
        ];
        let mut vars = VariableMap::new();
        collect_assignments(&blocks, &mut vars);
        assert_eq!(vars.get("name").map(String::as_str), Some("Ann"));
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn later_assignment_wins_within_scan_order() {
        let blocks = vec![
            paragraph("b-1", "[x = '1']"),
            paragraph("b-2", "[x = '2']"),
        ];
        let mut vars = VariableMap::new();
        collect_assignments(&blocks, &mut vars);
        assert_eq!(vars.get("x").map(String::as_str), Some("2"));
    }

    #[test]
    fn collection_ignores_empty_paragraphs() {
        let block = Block {
            id: BlockId::from("b-1"),
            payload: BlockPayload::Paragraph {
                paragraph: ParagraphPayload {
                    rich_text: vec![],
                    color: None,
                },
            },
        };
        let mut vars = VariableMap::new();
        collect_assignments(&[block], &mut vars);
        assert!(vars.is_empty());
    }

    #[test]
    fn report_counts_outcomes() {
        let report = SyncReport {
            pages: 2,
            variables: VariableMap::new(),
            writes: vec![
                WriteOutcome::Written {
                    block_id: BlockId::from("b-1"),
                },
                WriteOutcome::Unchanged {
                    block_id: BlockId::from("b-2"),
                },
                WriteOutcome::WouldWrite {
                    block_id: BlockId::from("b-3"),
                },
            ],
        };
        assert_eq!(report.written(), 2);
        assert_eq!(report.unchanged(), 1);
    }
}
