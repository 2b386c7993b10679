//! Orchestration
//!
//! - `engine`: the log washing engine, composing the line washer with the
//!   margin annotator
//! - `session`: an engine plus the writer commands print through

pub mod engine;
pub mod session;
