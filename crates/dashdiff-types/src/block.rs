//! Assembled output records.
//!
//! A [`Block`] groups everything that changed under one top-level field.
//! Single scalar modifications nested inside it are [`Change`]s; deeper or
//! multi-line changes are collapsed into [`Summary`] spans.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::change::ChangeKind;

/// All changes belonging to one top-level field of the compared documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
    pub change: ChangeKind,
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub summaries: Vec<Summary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<usize>,
}

impl Block {
    /// An empty block titled after a top-level key, awaiting nested content.
    pub fn new(title: impl Into<String>, change: ChangeKind) -> Self {
        Self {
            title: title.into(),
            old: None,
            new: None,
            change,
            changes: Vec::new(),
            summaries: Vec::new(),
            line_start: None,
            line_end: None,
        }
    }

    /// Returns `true` if the block carries a value of its own.
    pub fn has_value(&self) -> bool {
        self.old.is_some() || self.new.is_some()
    }

    /// Returns `true` if nothing is nested inside the block.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.summaries.is_empty()
    }

    /// Source span of the block, rendered as `start` or `start - end`.
    pub fn span(&self) -> Option<String> {
        format_span(self.line_start, self.line_end)
    }
}

/// A single before/after scalar modification nested in a block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
    pub change: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<usize>,
}

impl Change {
    pub fn span(&self) -> Option<String> {
        format_span(self.line_start, self.line_end)
    }
}

/// An elided deep or multi-line change, recorded by span and kind only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub key: String,
    pub change: ChangeKind,
    /// Number of leaf changes inside the span; `0` when counting is off.
    #[serde(default)]
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<usize>,
}

impl Summary {
    pub fn span(&self) -> Option<String> {
        format_span(self.line_start, self.line_end)
    }
}

fn format_span(start: Option<usize>, end: Option<usize>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(start), None) => Some(start.to_string()),
        (None, _) => None,
    }
}
