//! Assignment-marker micro-grammar and placeholder substitution.
//!
//! Two inline syntaxes appear in paragraph text:
//!
//! * assignment marker — `[name = 'value']`; name is `\w+`, value is the
//!   verbatim text between the first pair of single quotes
//! * placeholder token — `[name]`
//!
//! The grammar is deliberately small and must stay exactly this shape for
//! compatibility with content already written against it: single-quoted
//! values only, first-match-only extraction, no nesting.

use std::sync::LazyLock;

use regex::Regex;

use pagevar_core::types::VariableMap;

static ASSIGNMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\w+)\s*=\s*'([^']+)'\]").unwrap());

/// A variable assignment extracted from paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Extract the first assignment marker in `text`, if any.
///
/// Later markers in the same text are ignored — not extracted and not
/// stripped. Text with no marker yields `None`, never an error.
pub fn parse_assignment(text: &str) -> Option<Assignment> {
    let caps = ASSIGNMENT_RE.captures(text)?;
    Some(Assignment {
        name: caps[1].to_string(),
        value: caps[2].to_string(),
    })
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

/// Rewrite `text` against the collected `variables`.
///
/// Every occurrence of a literal `[name]` placeholder is replaced with its
/// mapped value, then the substituted text is re-scanned and the first
/// assignment marker found is deleted — exactly the matched substring,
/// surrounding whitespace untouched. Substitution runs strictly before
/// stripping, so a value that itself looks like a placeholder is not
/// re-expanded through the marker.
///
/// Pure function: no store interaction, no side effects.
pub fn apply_variables(text: &str, variables: &VariableMap) -> String {
    let mut out = text.to_string();

    for (name, value) in variables {
        let placeholder = format!("[{name}]");
        if out.contains(&placeholder) {
            out = out.replace(&placeholder, value);
        }
    }

    let marker = ASSIGNMENT_RE.find(&out).map(|m| m.range());
    if let Some(range) = marker {
        out.replace_range(range, "");
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
