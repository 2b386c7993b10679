//! Error types for wash passes and margin configuration
//!
//! Grammar mismatches and configuration errors abort the current operation
//! and are reported with enough context to trace them back to whoever
//! built the history query. The classifier and glyph translator are total
//! and have no error type.

use crate::RecordStyle;
use thiserror::Error;

/// Longest snippet of offending text carried by a grammar mismatch
pub const SNIPPET_LENGTH: usize = 60;

#[derive(Debug, Error)]
pub enum WashError {
    #[error("expected a {style} record at line {line} (offset {offset}), found {snippet:?}")]
    GrammarMismatch {
        style: RecordStyle,
        line: usize,
        offset: usize,
        snippet: String,
    },

    #[error("invalid {style} grammar: {source}")]
    Grammar {
        style: RecordStyle,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Margin(#[from] MarginConfigError),
}

impl WashError {
    pub fn mismatch(style: RecordStyle, line: usize, offset: usize, text: &str) -> Self {
        WashError::GrammarMismatch {
            style,
            line,
            offset,
            snippet: text.chars().take(SNIPPET_LENGTH).collect(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarginConfigError {
    #[error("duration table is empty")]
    EmptyTable,

    #[error("duration table must be strictly descending, found {previous}s before {next}s")]
    NotDescending { previous: u64, next: u64 },

    #[error("finest duration unit must be one second, found {0}s")]
    FinestUnitNotSecond(u64),

    #[error("unit width must be 1 or {expected}, got {given}")]
    UnitWidth { given: usize, expected: usize },

    #[error("margin width {given} cannot fit a duration, minimum is {minimum}")]
    TruncationOverflow { given: usize, minimum: usize },
}
