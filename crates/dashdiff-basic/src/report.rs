//! Output of a finished assembly run.

use serde::{Deserialize, Serialize};

use dashdiff_types::{Block, Change, Summary};

/// The blocks produced by one run, plus whatever was left unterminated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub unterminated: Unterminated,
}

impl Assembly {
    /// Returns `true` if no blocks were produced.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Number of changes across all blocks.
    pub fn change_count(&self) -> usize {
        self.blocks.iter().map(|b| b.changes.len()).sum()
    }

    /// Number of summaries across all blocks.
    pub fn summary_count(&self) -> usize {
        self.blocks.iter().map(|b| b.summaries.len()).sum()
    }
}

/// Constructs that were opened but never emitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Unterminated {
    /// The block still under construction at end of input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<Block>,
    /// An old value at change level that never met its new value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<Change>,
    /// A summary run never closed by an unchanged line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    /// Constructs lost along the way: blocks replaced before completion,
    /// changes superseded by another old value, and old values (block-level
    /// or of a keyless body pair) whose new value never came.
    #[serde(default)]
    pub discarded: usize,
}

impl Unterminated {
    /// Total number of constructs that did not reach the output.
    pub fn count(&self) -> usize {
        usize::from(self.block.is_some())
            + usize::from(self.change.is_some())
            + usize::from(self.summary.is_some())
            + self.discarded
    }

    /// Returns `true` if every opened construct was emitted.
    pub fn is_clean(&self) -> bool {
        self.count() == 0
    }
}
