use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Classification of a diff line.
///
/// `OldValue` and `NewValue` are the two halves of an in-place modification
/// and always arrive in that order at the same indent. `Structural` marks
/// lines that only carry shape (an object or array opening under a key, or a
/// closing bracket) and no change of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Unchanged,
    Added,
    Deleted,
    #[serde(alias = "old")]
    OldValue,
    #[serde(alias = "new")]
    NewValue,
    #[serde(alias = "nil")]
    Structural,
}

impl ChangeKind {
    /// The display vocabulary renderers use for icons and labels.
    pub fn label(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Deleted => "deleted",
            _ => "changed",
        }
    }

    /// Whether the line itself carries a change (neither `Unchanged` nor
    /// `Structural`).
    pub fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged | Self::Structural)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::OldValue => "old_value",
            Self::NewValue => "new_value",
            Self::Structural => "structural",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unchanged" => Ok(Self::Unchanged),
            "added" => Ok(Self::Added),
            "deleted" => Ok(Self::Deleted),
            "old_value" | "old" => Ok(Self::OldValue),
            "new_value" | "new" => Ok(Self::NewValue),
            "structural" | "nil" => Ok(Self::Structural),
            other => Err(TypeError::UnknownChangeKind(other.to_string())),
        }
    }
}
