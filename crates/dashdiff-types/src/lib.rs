//! Foundation types for dashdiff.
//!
//! A line producer flattens the diff of two hierarchical documents into
//! [`DiffLine`] records; the assembler in `dashdiff-basic` folds those into
//! [`Block`] records for a renderer. Every other dashdiff crate depends on
//! `dashdiff-types`.
//!
//! # Key Types
//!
//! - [`ChangeKind`] -- Classification of a line (unchanged, added, old/new half, ...)
//! - [`DiffLine`] -- One flattened row of a hierarchical diff
//! - [`Block`] -- All changes under one top-level field
//! - [`Change`] -- A single before/after scalar modification
//! - [`Summary`] -- An elided multi-line change

pub mod block;
pub mod change;
pub mod error;
pub mod line;

pub use block::{Block, Change, Summary};
pub use change::ChangeKind;
pub use error::TypeError;
pub use line::DiffLine;
