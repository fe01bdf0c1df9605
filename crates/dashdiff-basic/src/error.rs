//! Error types for the basic diff crate.

/// A breach of the line producer contract, reported by
/// [`check_contract`](crate::check_contract).
///
/// Assembly itself never fails; these errors exist so callers can reject a
/// stream up front instead of rendering a degraded summary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("line number 0 at position {position}")]
    ZeroLineNumber { position: usize },

    #[error("line {line} follows line {previous}")]
    LineNumberRegressed { line: usize, previous: usize },

    #[error("old value at line {line} (indent {indent}) has no matching new value")]
    UnmatchedOldValue { line: usize, indent: usize },

    #[error("new value at line {line} (indent {indent}) has no preceding old value")]
    OrphanNewValue { line: usize, indent: usize },

    #[error("top-level {kind} at line {line} has no key")]
    UntitledTopLevel { line: usize, kind: String },
}

/// Convenience alias for contract results.
pub type ContractResult<T> = Result<T, ContractError>;
