//! Audit of the line producer contract.
//!
//! The assembler trusts its input. This check runs over the same stream in a
//! separate single pass and lists every place the stream breaks the
//! producer contract: positive, non-decreasing line numbers, every old value
//! matched by a new value at the same indent, and keyed top-level changes.

use std::collections::BTreeMap;

use tracing::debug;

use dashdiff_types::{ChangeKind, DiffLine};

use crate::assembler::TOP_LEVEL_INDENT;
use crate::error::{ContractError, ContractResult};

/// Result of checking a stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractReport {
    /// Number of lines examined.
    pub line_count: usize,
    /// Violations in order of detection.
    pub violations: Vec<ContractError>,
}

impl ContractReport {
    /// Returns `true` if no violation was found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first violation, if any, as an error.
    pub fn into_result(self) -> ContractResult<()> {
        match self.violations.into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}

/// Check `lines` against the line producer contract.
pub fn check_contract(lines: &[DiffLine]) -> ContractReport {
    let mut violations = Vec::new();
    // indent -> line number of the old value waiting for its new value
    let mut pending: BTreeMap<usize, usize> = BTreeMap::new();
    let mut previous: Option<usize> = None;

    for (position, line) in lines.iter().enumerate() {
        if line.line_num == 0 {
            violations.push(ContractError::ZeroLineNumber { position });
        } else {
            if let Some(previous) = previous {
                if line.line_num < previous {
                    violations.push(ContractError::LineNumberRegressed {
                        line: line.line_num,
                        previous,
                    });
                }
            }
            previous = Some(line.line_num);
        }

        match line.change {
            ChangeKind::OldValue => {
                if let Some(open) = pending.insert(line.indent, line.line_num) {
                    violations.push(ContractError::UnmatchedOldValue {
                        line: open,
                        indent: line.indent,
                    });
                }
            }
            ChangeKind::NewValue => {
                if pending.remove(&line.indent).is_none() {
                    violations.push(ContractError::OrphanNewValue {
                        line: line.line_num,
                        indent: line.indent,
                    });
                }
            }
            _ => {}
        }

        if line.indent == TOP_LEVEL_INDENT && !line.has_key() && line.change.is_change() {
            violations.push(ContractError::UntitledTopLevel {
                line: line.line_num,
                kind: line.change.to_string(),
            });
        }
    }

    let mut unmatched: Vec<_> = pending.into_iter().collect();
    unmatched.sort_by_key(|&(_, line)| line);
    violations.extend(
        unmatched
            .into_iter()
            .map(|(indent, line)| ContractError::UnmatchedOldValue { line, indent }),
    );

    debug!(lines = lines.len(), violations = violations.len(), "contract checked");

    ContractReport {
        line_count: lines.len(),
        violations,
    }
}
