//! Washing of history query output
//!
//! - `grammar`: one anchored pattern per record style, with named slots
//! - `record`: the structured records a pass emits
//! - `ref_label`: ref decoration parsing
//! - `options`: per-pass switches and widths
//! - `render`: faced output lines
//! - `body`: continuation scanning for log records
//! - `washer`: the line scanner tying them together
//!
//! ## Algorithm
//!
//! The washer walks the color-resolved text one line at a time. Each line
//! must match the style's grammar; its slots become a [`record::CommitRecord`]
//! and a rendered heading. Log records may own the lines that follow them
//! (extended header, diffstat, message body) up to the next heading.

pub mod body;
pub mod grammar;
pub mod options;
pub mod record;
pub mod ref_label;
pub mod render;
pub mod washer;
