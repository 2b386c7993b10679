//! Rendered output lines
//!
//! A wash pass turns every raw line it consumes into zero or more
//! [`RenderedLine`]s. Each line is a run of [`Segment`]s tagged with a
//! [`Face`], so the same result can be written as plain text or painted
//! for a terminal.

use crate::artifacts::graph::ansi::{AnsiStyle, StyledString};
use crate::artifacts::log::record::{BisectVerdict, CherryMarker, GpgStatus, SideMarker};
use crate::artifacts::log::ref_label::RefKind;
use crate::artifacts::margin::MarginSource;
use crate::artifacts::reflog::ReflogCategory;
use colored::{ColoredString, Colorize};
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Plain,
    /// Style resolved from an inline color escape
    Ansi(AnsiStyle),
    Graph,
    Hash,
    Signature(GpgStatus),
    Cherry(CherryMarker),
    Side(SideMarker),
    Ref(RefKind),
    Reflog(ReflogCategory),
    Bisect(BisectVerdict),
    Keyword,
    DiffAdded,
    DiffRemoved,
    DiffHeader,
    DiffHunk,
    Button,
}

impl Face {
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            Face::Plain | Face::Graph => text.normal(),
            Face::Ansi(style) => style.paint(text),
            Face::Hash => text.yellow(),
            Face::Signature(status) => status.paint(text),
            Face::Cherry(CherryMarker::Applied) => text.dimmed(),
            Face::Cherry(CherryMarker::Unmatched) => text.green(),
            Face::Side(SideMarker::Left) => text.red(),
            Face::Side(SideMarker::Right) => text.green(),
            Face::Ref(kind) => kind.paint(text),
            Face::Reflog(category) => category.paint(text),
            Face::Bisect(BisectVerdict::Bad) => text.red(),
            Face::Bisect(BisectVerdict::Skip) => text.yellow(),
            Face::Bisect(BisectVerdict::Good) => text.green(),
            Face::Keyword => text.blue().bold(),
            Face::DiffAdded => text.green(),
            Face::DiffRemoved => text.red(),
            Face::DiffHeader => text.bold(),
            Face::DiffHunk => text.cyan(),
            Face::Button => text.italic(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Segment {
    pub text: String,
    pub face: Face,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationKind {
    Message,
    /// A line holding only graph glyphs
    Graph,
    Header,
    Diff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Heading of the entry at this index
    Record(usize),
    Continuation(ContinuationKind),
    Sentinel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub kind: LineKind,
    pub segments: Vec<Segment>,
    pub margin: MarginSource,
}

impl RenderedLine {
    pub fn new(kind: LineKind) -> Self {
        RenderedLine {
            kind,
            segments: Vec::new(),
            margin: MarginSource::None,
        }
    }

    pub fn with_margin(self, margin: MarginSource) -> Self {
        RenderedLine { margin, ..self }
    }

    pub fn push(&mut self, text: impl Into<String>, face: Face) {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment::new(text, face));
        }
    }

    /// Append resolved text, falling back to `face` where it carries no style
    pub fn push_styled(&mut self, styled: &StyledString, face: Face) {
        for (text, style) in styled.runs() {
            match style {
                Some(style) => self.push(text, Face::Ansi(style)),
                None => self.push(text, face),
            }
        }
    }

    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect()
    }

    pub fn painted(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.face.paint(&segment.text).to_string())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| segment.text.chars().count())
            .sum()
    }
}
