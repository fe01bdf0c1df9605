use serde::{Deserialize, Serialize};

/// What [`BlockAssembler::finish`](crate::BlockAssembler::finish) does with
/// constructs still open at end of input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnterminatedPolicy {
    /// Emit nothing that was left open; report it instead.
    #[default]
    Drop,
    /// Close an open summary at the last seen line, then append the open
    /// block unless it is an unmatched old value.
    Flush,
}

/// Configuration for a single assembly run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Handling of blocks and summaries left open at end of input.
    pub on_unterminated: UnterminatedPolicy,
    /// Count leaf changes inside each summary span. When `false`, every
    /// summary has a count of zero.
    pub count_leaves: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            on_unterminated: UnterminatedPolicy::Drop,
            count_leaves: true,
        }
    }
}

impl AssemblerConfig {
    /// Open constructs are dropped and summaries carry no count.
    pub fn compatible() -> Self {
        Self {
            on_unterminated: UnterminatedPolicy::Drop,
            count_leaves: false,
        }
    }

    /// Flush whatever can be flushed at end of input.
    pub fn flushing() -> Self {
        Self {
            on_unterminated: UnterminatedPolicy::Flush,
            ..Default::default()
        }
    }
}
