//! Data types and algorithms of a wash pass
//!
//! - `core`: output plumbing (pager wrapper, output target)
//! - `diff`: diffstat and diff rendering behind the `DiffWasher` seam
//! - `graph`: inline color resolution and graph glyph translation
//! - `log`: record grammars, records and the line washer
//! - `margin`: relative durations and author/age margins
//! - `reflog`: reflog subject classification

pub mod core;
pub mod diff;
pub mod graph;
pub mod log;
pub mod margin;
pub mod reflog;
