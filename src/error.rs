//! Crate error type.
//!
//! Only the operations around the total core can fail: rule construction,
//! grid edits, header mapping, and configuration import/export. Data-quality
//! findings are never errors; see [`crate::validation::RowError`].

use crate::models::EntityKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Rule description must not be empty")]
    EmptyRuleDescription,

    #[error("Unknown rule type: {0}")]
    UnknownRuleKind(String),

    #[error("Unknown {kind} column: {column}")]
    UnknownColumn { kind: EntityKind, column: String },

    #[error("Row {row} out of range ({len} {kind} rows)")]
    RowOutOfRange {
        kind: EntityKind,
        row: usize,
        len: usize,
    },

    #[error("Header mapping failed: {0}")]
    HeaderMapping(String),

    #[error("Invalid rule configuration: {0}")]
    InvalidRuleConfig(String),

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
