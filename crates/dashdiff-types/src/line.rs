use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::change::ChangeKind;

/// One flattened row of a hierarchical diff.
///
/// A JSON `null` value deserializes to `None`: a null scalar carries no
/// value as far as the assembler is concerned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Nesting depth. Top-level fields of the compared documents sit at 1.
    pub indent: usize,
    /// Object key of the row; empty for array elements and closing brackets.
    #[serde(default)]
    pub key: String,
    /// Scalar value of the row, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// How the row changed.
    pub change: ChangeKind,
    /// Source line number in the flattened diff (1-based).
    #[serde(rename = "line")]
    pub line_num: usize,
}

impl DiffLine {
    /// Create a new diff line.
    pub fn new(
        indent: usize,
        key: impl Into<String>,
        value: Option<Value>,
        change: ChangeKind,
        line_num: usize,
    ) -> Self {
        Self {
            indent,
            key: key.into(),
            value,
            change,
            line_num,
        }
    }

    /// A keyed or keyless line without a scalar value.
    pub fn shape(indent: usize, key: impl Into<String>, change: ChangeKind, line_num: usize) -> Self {
        Self::new(indent, key, None, change, line_num)
    }

    /// A line carrying a scalar value.
    pub fn scalar(
        indent: usize,
        key: impl Into<String>,
        value: impl Into<Value>,
        change: ChangeKind,
        line_num: usize,
    ) -> Self {
        Self::new(indent, key, Some(value.into()), change, line_num)
    }

    /// Returns `true` if the line carries a non-empty key.
    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    /// Returns `true` if the line is a keyed scalar, i.e. a candidate for a
    /// single-value change.
    pub fn is_keyed_scalar(&self) -> bool {
        self.has_key() && self.value.is_some()
    }
}
