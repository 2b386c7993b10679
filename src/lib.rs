//! Structured rendering of git history output
//!
//! `logwash` takes the line-oriented text produced by history queries
//! (`git log`, `git cherry`, `git reflog`, `git stash list`, submodule
//! logs and bisect traces) and re-segments it into typed records with
//! presentation metadata: relative-age margins, translated graph glyphs
//! and classified reflog subjects.
//!
//! - `areas`: the washing engine and the output session that wraps it
//! - `artifacts`: grammars, records, the line washer and its leaf helpers
//! - `commands`: plumbing and porcelain command implementations
//! - `errors`: typed failures of a wash pass or margin configuration

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::engine::{LogWashingEngine, WashOutput};
pub use areas::session::Session;

/// The kind of history query a raw text block was produced for.
///
/// One style selects one record grammar for the whole wash pass; the
/// engine never tries to detect the style from the text itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum RecordStyle {
    Log,
    Cherry,
    Module,
    Reflog,
    Stash,
    BisectVisual,
    BisectLog,
}

impl RecordStyle {
    pub const ALL: [RecordStyle; 7] = [
        RecordStyle::Log,
        RecordStyle::Cherry,
        RecordStyle::Module,
        RecordStyle::Reflog,
        RecordStyle::Stash,
        RecordStyle::BisectVisual,
        RecordStyle::BisectLog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStyle::Log => "log",
            RecordStyle::Cherry => "cherry",
            RecordStyle::Module => "module",
            RecordStyle::Reflog => "reflog",
            RecordStyle::Stash => "stash",
            RecordStyle::BisectVisual => "bisect-visual",
            RecordStyle::BisectLog => "bisect-log",
        }
    }

    /// Styles whose headings carry an author/age margin.
    pub fn has_margin(&self) -> bool {
        matches!(
            self,
            RecordStyle::Log | RecordStyle::Reflog | RecordStyle::Stash
        )
    }
}

impl std::fmt::Display for RecordStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
