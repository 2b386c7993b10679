//! Plumbing commands
//!
//! - `records`: one tab-separated line per washed entry
//! - `age`: a relative duration as the margin would show it
//! - `classify`: category and rendered text of a reflog subject

pub mod age;
pub mod classify;
pub mod records;
