//! Basic diff assembler for dashdiff.
//!
//! Folds the flattened diff of two hierarchical documents into one
//! [`Block`](dashdiff_types::Block) per top-level field, ready for a
//! renderer.
//!
//! # Key Types
//!
//! - [`BlockAssembler`] -- Single-pass, incremental folding state machine
//! - [`transform`] / [`assemble`] -- One-shot entry points
//! - [`Assembly`] / [`Unterminated`] -- Output of the finish step
//! - [`AssemblerConfig`] -- Unterminated-construct policy and summary counting
//! - [`check_contract`] / [`ContractReport`] -- Audit of the input stream

pub mod assembler;
pub mod config;
pub mod contract;
pub mod error;
pub mod report;

pub use assembler::{assemble, transform, BlockAssembler, BLOCK_BODY_INDENT, TOP_LEVEL_INDENT};
pub use config::{AssemblerConfig, UnterminatedPolicy};
pub use contract::{check_contract, ContractReport};
pub use error::{ContractError, ContractResult};
pub use report::{Assembly, Unterminated};
