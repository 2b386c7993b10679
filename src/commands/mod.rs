//! Command implementations
//!
//! - `plumbing`: tab-separated, script-friendly output (records, age, classify)
//! - `porcelain`: the rendered document for people (show)
//!
//! Every command is an `impl Session` block writing through the session's
//! writer.

pub mod plumbing;
pub mod porcelain;
