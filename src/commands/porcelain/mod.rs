//! Porcelain commands
//!
//! - `show`: the washed document with its margin column

pub mod show;
