//! The block assembler: folds a flattened diff into per-field blocks.
//!
//! Lines are consumed once, left to right, with no lookahead. Each top-level
//! field of the compared documents becomes a [`Block`]. Keyed scalar
//! modifications below it become [`Change`]s, and anything deeper or spanning
//! several lines collapses into a [`Summary`] that only records where the run
//! starts and ends.
//!
//! # Line producer contract
//!
//! The assembler relies on the nesting convention of the line producer:
//! top-level fields sit at [`TOP_LEVEL_INDENT`] and the first level inside a
//! compound top-level value sits at [`BLOCK_BODY_INDENT`]. Dropping from the
//! body indent back to the top level on a structural line (the closing
//! bracket, or the next field) is what ends a block. If the producer changes
//! its nesting convention, these constants change with it.

use serde_json::Value;
use tracing::debug;

use dashdiff_types::{Block, Change, ChangeKind, DiffLine, Summary};

use crate::config::{AssemblerConfig, UnterminatedPolicy};
use crate::report::{Assembly, Unterminated};

/// Indent of the top-level fields of the compared documents.
pub const TOP_LEVEL_INDENT: usize = 1;

/// Indent of the first nested level under a compound top-level value.
pub const BLOCK_BODY_INDENT: usize = 2;

/// Fold `lines` into blocks using the default configuration.
///
/// Anything left open at end of input is dropped. Use [`assemble`] or
/// [`BlockAssembler::finish`] to see what was dropped.
pub fn transform(lines: &[DiffLine]) -> Vec<Block> {
    assemble(lines, &AssemblerConfig::default()).blocks
}

/// Fold `lines` into blocks and run the finish step.
pub fn assemble(lines: &[DiffLine], config: &AssemblerConfig) -> Assembly {
    let mut assembler = BlockAssembler::new(config.clone());
    assembler.push_all(lines);
    assembler.finish()
}

/// The most specific key seen so far, used to label summaries.
#[derive(Clone, Debug, PartialEq, Eq)]
struct NarrowKey {
    key: String,
    indent: usize,
}

/// Scratch state of one run. An open summary run is `summary.is_some()`.
#[derive(Debug, Default)]
struct ScratchState {
    last_indent: usize,
    last_line: usize,
    block: Option<Block>,
    change: Option<Change>,
    summary: Option<Summary>,
    narrow: Option<NarrowKey>,
    /// Old value (and its line) of a keyless body pair, held back until the
    /// new value arrives.
    block_old: Option<(Value, usize)>,
    discarded: usize,
}

/// Incremental assembler. One instance per run.
#[derive(Debug)]
pub struct BlockAssembler {
    config: AssemblerConfig,
    state: ScratchState,
    blocks: Vec<Block>,
}

impl Default for BlockAssembler {
    fn default() -> Self {
        Self::new(AssemblerConfig::default())
    }
}

impl BlockAssembler {
    /// Create an assembler with empty scratch state.
    pub fn new(config: AssemblerConfig) -> Self {
        Self {
            config,
            state: ScratchState::default(),
            blocks: Vec::new(),
        }
    }

    /// Blocks emitted so far.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Feed every line of `lines` in order.
    pub fn push_all<'a>(&mut self, lines: impl IntoIterator<Item = &'a DiffLine>) {
        for line in lines {
            self.push(line);
        }
    }

    /// Feed one line.
    pub fn push(&mut self, line: &DiffLine) {
        if self.state.last_indent == BLOCK_BODY_INDENT
            && line.indent == TOP_LEVEL_INDENT
            && line.change == ChangeKind::Structural
        {
            self.drop_pending_block_old();
            if let Some(block) = self.state.block.take() {
                if is_unmatched_old(&block) {
                    debug!(title = %block.title, "old value without new value at block end");
                    self.state.discarded += 1;
                } else {
                    self.emit_block(block);
                }
            }
        }

        self.state.last_indent = line.indent;
        self.state.last_line = line.line_num;

        match line.indent {
            0 => {}
            TOP_LEVEL_INDENT => self.top_level(line),
            _ => self.nested(line),
        }
    }

    /// End the run and hand over the output.
    pub fn finish(self) -> Assembly {
        let Self {
            config,
            state,
            mut blocks,
        } = self;

        let mut unterminated = Unterminated {
            discarded: state.discarded + usize::from(state.block_old.is_some()),
            ..Default::default()
        };

        match config.on_unterminated {
            UnterminatedPolicy::Drop => {
                unterminated.block = state.block;
                unterminated.summary = state.summary;
            }
            UnterminatedPolicy::Flush => {
                let mut block = state.block;
                let mut summary = state.summary;
                if let Some(open) = block.as_mut() {
                    if let Some(mut run) = summary.take() {
                        run.line_end = Some(state.last_line);
                        open.summaries.push(run);
                    }
                }
                match block {
                    Some(open) if !is_unmatched_old(&open) => {
                        debug!(title = %open.title, "flushed open block");
                        blocks.push(open);
                    }
                    other => unterminated.block = other,
                }
                unterminated.summary = summary;
            }
        }
        // An old value without its new value is never emitted.
        unterminated.change = state.change;

        if !unterminated.is_clean() {
            debug!(
                open_block = unterminated.block.is_some(),
                open_change = unterminated.change.is_some(),
                open_summary = unterminated.summary.is_some(),
                discarded = unterminated.discarded,
                "assembly finished with unterminated constructs"
            );
        }

        Assembly {
            blocks,
            unterminated,
        }
    }

    // ---------------------------------------------------------------
    // Top level
    // ---------------------------------------------------------------

    fn top_level(&mut self, line: &DiffLine) {
        match line.change {
            ChangeKind::Structural => {
                if line.has_key() {
                    self.open_block(Block::new(line.key.as_str(), ChangeKind::Structural));
                }
            }
            ChangeKind::Added | ChangeKind::Deleted => {
                let mut block = Block::new(line.key.as_str(), line.change);
                block.new = line.value.clone();
                block.line_start = Some(line.line_num);
                self.emit_block(block);
            }
            ChangeKind::OldValue => {
                let mut block = Block::new(line.key.as_str(), ChangeKind::OldValue);
                block.old = line.value.clone();
                block.line_start = Some(line.line_num);
                self.open_block(block);
            }
            ChangeKind::NewValue => {
                self.drop_pending_block_old();
                if let Some(mut block) = self.state.block.take() {
                    block.new = line.value.clone();
                    block.line_end = Some(line.line_num);
                    self.emit_block(block);
                }
            }
            ChangeKind::Unchanged => {}
        }
    }

    fn open_block(&mut self, block: Block) {
        self.drop_pending_block_old();
        if let Some(previous) = self.state.block.replace(block) {
            debug!(title = %previous.title, "block replaced before completion");
            self.state.discarded += 1;
        }
    }

    fn drop_pending_block_old(&mut self) {
        if self.state.block_old.take().is_some() {
            self.state.discarded += 1;
        }
    }

    fn emit_block(&mut self, block: Block) {
        debug!(
            title = %block.title,
            changes = block.changes.len(),
            summaries = block.summaries.len(),
            "block complete"
        );
        self.blocks.push(block);
    }

    // ---------------------------------------------------------------
    // Nested levels
    // ---------------------------------------------------------------

    fn nested(&mut self, line: &DiffLine) {
        // Content of a field that already went out (or never opened) has
        // nowhere to go.
        if self.state.block.is_none() {
            return;
        }

        if self.state.summary.is_none() {
            if line.is_keyed_scalar() {
                self.scalar_change(line);
                return;
            }
            if self.block_value(line) {
                return;
            }
        }

        self.summary_run(line);
    }

    /// A keyed scalar outside of a summary run.
    fn scalar_change(&mut self, line: &DiffLine) {
        match line.change {
            ChangeKind::Added | ChangeKind::Deleted => {
                self.attach_change(Change {
                    key: line.key.clone(),
                    old: None,
                    new: line.value.clone(),
                    change: line.change,
                    line_start: Some(line.line_num),
                    line_end: None,
                });
            }
            ChangeKind::OldValue => {
                let change = Change {
                    key: line.key.clone(),
                    old: line.value.clone(),
                    new: None,
                    change: ChangeKind::OldValue,
                    line_start: Some(line.line_num),
                    line_end: None,
                };
                if let Some(previous) = self.state.change.replace(change) {
                    debug!(key = %previous.key, "old value superseded before its new value");
                    self.state.discarded += 1;
                }
            }
            ChangeKind::NewValue => {
                if let Some(mut change) = self.state.change.take() {
                    change.new = line.value.clone();
                    change.line_end = Some(line.line_num);
                    self.attach_change(change);
                }
            }
            ChangeKind::Unchanged | ChangeKind::Structural => {}
        }
    }

    /// A keyless scalar pair directly in the body of a block that has no
    /// value yet is the block's own value. Returns `true` if consumed.
    fn block_value(&mut self, line: &DiffLine) -> bool {
        if line.indent != BLOCK_BODY_INDENT || line.has_key() || line.value.is_none() {
            return false;
        }
        let Some(block) = self.state.block.as_mut() else {
            return false;
        };

        match line.change {
            ChangeKind::OldValue if !block.has_value() && self.state.block_old.is_none() => {
                self.state.block_old = line.value.clone().map(|old| (old, line.line_num));
                true
            }
            ChangeKind::NewValue => match self.state.block_old.take() {
                Some((old, line_start)) => {
                    block.old = Some(old);
                    block.new = line.value.clone();
                    block.change = ChangeKind::OldValue;
                    block.line_start = Some(line_start);
                    block.line_end = Some(line.line_num);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn summary_run(&mut self, line: &DiffLine) {
        if line.has_key() {
            self.state.narrow = Some(NarrowKey {
                key: line.key.clone(),
                indent: line.indent,
            });
        }

        if line.change == ChangeKind::Unchanged {
            if let Some(mut summary) = self.state.summary.take() {
                summary.line_end = Some(line.line_num);
                self.attach_summary(summary);
            }
            return;
        }

        if !line.change.is_change() {
            return;
        }

        let counted = self.config.count_leaves && is_leaf(line);
        if let Some(summary) = self.state.summary.as_mut() {
            if counted {
                summary.count += 1;
            }
            return;
        }

        let key = self.summary_label(line);
        self.state.summary = Some(Summary {
            key,
            change: line.change,
            count: usize::from(counted),
            line_start: Some(line.line_num),
            line_end: None,
        });
    }

    /// The narrow key while it is at or above the current line, otherwise
    /// the block title.
    fn summary_label(&self, line: &DiffLine) -> String {
        match &self.state.narrow {
            Some(narrow) if narrow.indent <= line.indent => narrow.key.clone(),
            _ => self
                .state
                .block
                .as_ref()
                .map(|b| b.title.clone())
                .unwrap_or_default(),
        }
    }

    fn attach_change(&mut self, change: Change) {
        if let Some(block) = self.state.block.as_mut() {
            debug!(block = %block.title, key = %change.key, kind = %change.change, "change");
            block.changes.push(change);
        }
    }

    fn attach_summary(&mut self, summary: Summary) {
        if let Some(block) = self.state.block.as_mut() {
            debug!(block = %block.title, key = %summary.key, count = summary.count, "summary");
            block.summaries.push(summary);
        }
    }
}

/// A scalar-valued change line. An old/new pair counts once, on its old
/// half; brackets and keys of compound values are not leaves.
fn is_leaf(line: &DiffLine) -> bool {
    line.value.is_some()
        && matches!(
            line.change,
            ChangeKind::Added | ChangeKind::Deleted | ChangeKind::OldValue
        )
}

/// Every completed old/new pair records where its new value landed.
fn is_unmatched_old(block: &Block) -> bool {
    block.change == ChangeKind::OldValue && block.line_end.is_none()
}
