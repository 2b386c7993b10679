//! Record grammars, one per [`RecordStyle`]
//!
//! Each grammar recognizes the first line of a record and names the slots
//! it captures. A slot a style does not define is simply absent from its
//! captures; lookups for it return `None` instead of failing.

use crate::RecordStyle;
use crate::errors::WashError;
use regex::{Captures, Match, Regex};

const LOG_PATTERN: &str = r"^(?P<graph>(?:[-_/|\\*o<>. ] ?)*)(?P<hash>[0-9a-fA-F]+) (?:(?P<refs>\([^()]+\)) )?(?P<gpg>[BGUXYREN])?\[(?P<author>[^\]]*)\]\[(?P<date>[^\]]*)\](?P<message>.*)$";
const CHERRY_PATTERN: &str = r"^(?P<cherry>[-+]) (?P<hash>[0-9a-fA-F]+) (?P<message>.*)$";
const MODULE_PATTERN: &str = r"^(?:(?P<side>[<>]) )?(?P<hash>[0-9a-fA-F]+) (?P<message>.*)$";
const STASH_PATTERN: &str = r"^(?P<hash>[^ ]+)(?P<author> )(?P<date>[^ ]+) (?P<message>.*)$";
const BISECT_VISUAL_PATTERN: &str = r"^(?P<graph>[-_/|\\*o<>. ]*)(?P<hash>[0-9a-fA-F]+)(?: (?P<refs>\([^()]+\)))? (?P<message>.*)$";
const BISECT_LOG_PATTERN: &str = r"^# (?P<subject>bad:|skip:|good:) \[(?P<hash>[^\]]+)\] (?P<message>.*)$";
const REFLOG_PATTERN: &str = r"^(?P<hash>[^ ]+) (?:[^@]+@\{(?P<reflog_date>[^}]+)\}(?: (?P<subject>merge |autosave |restart |[^:]+: )?(?P<message>.*))?| ?)$";

/// A named capture a grammar may define
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Graph,
    Hash,
    Refs,
    GpgStatus,
    Author,
    Date,
    Message,
    CherryMarker,
    SideMarker,
    ReflogDate,
    ReflogSubject,
}

impl Slot {
    pub fn capture_name(&self) -> &'static str {
        match self {
            Slot::Graph => "graph",
            Slot::Hash => "hash",
            Slot::Refs => "refs",
            Slot::GpgStatus => "gpg",
            Slot::Author => "author",
            Slot::Date => "date",
            Slot::Message => "message",
            Slot::CherryMarker => "cherry",
            Slot::SideMarker => "side",
            Slot::ReflogDate => "reflog_date",
            Slot::ReflogSubject => "subject",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordGrammar {
    style: RecordStyle,
    regex: Regex,
}

impl RecordGrammar {
    pub fn pattern(style: RecordStyle) -> &'static str {
        match style {
            RecordStyle::Log => LOG_PATTERN,
            RecordStyle::Cherry => CHERRY_PATTERN,
            RecordStyle::Module => MODULE_PATTERN,
            RecordStyle::Reflog => REFLOG_PATTERN,
            RecordStyle::Stash => STASH_PATTERN,
            RecordStyle::BisectVisual => BISECT_VISUAL_PATTERN,
            RecordStyle::BisectLog => BISECT_LOG_PATTERN,
        }
    }

    pub fn slots(style: RecordStyle) -> &'static [Slot] {
        match style {
            RecordStyle::Log => &[
                Slot::Graph,
                Slot::Hash,
                Slot::Refs,
                Slot::GpgStatus,
                Slot::Author,
                Slot::Date,
                Slot::Message,
            ],
            RecordStyle::Cherry => &[Slot::CherryMarker, Slot::Hash, Slot::Message],
            RecordStyle::Module => &[Slot::SideMarker, Slot::Hash, Slot::Message],
            RecordStyle::Reflog => &[
                Slot::Hash,
                Slot::ReflogDate,
                Slot::ReflogSubject,
                Slot::Message,
            ],
            RecordStyle::Stash => &[Slot::Hash, Slot::Author, Slot::Date, Slot::Message],
            RecordStyle::BisectVisual => &[Slot::Graph, Slot::Hash, Slot::Refs, Slot::Message],
            RecordStyle::BisectLog => &[Slot::ReflogSubject, Slot::Hash, Slot::Message],
        }
    }

    pub fn compile(style: RecordStyle) -> Result<Self, WashError> {
        let regex = Regex::new(Self::pattern(style))
            .map_err(|source| WashError::Grammar { style, source })?;

        Ok(RecordGrammar { style, regex })
    }

    pub fn style(&self) -> RecordStyle {
        self.style
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    pub fn captures<'t>(&self, line: &'t str) -> Option<SlotCaptures<'t>> {
        self.regex
            .captures(line)
            .map(|captures| SlotCaptures { captures })
    }
}

/// Captures of one matched line, addressed by [`Slot`]
#[derive(Debug)]
pub struct SlotCaptures<'t> {
    captures: Captures<'t>,
}

impl<'t> SlotCaptures<'t> {
    pub fn get(&self, slot: Slot) -> Option<Match<'t>> {
        self.captures.name(slot.capture_name())
    }

    pub fn text(&self, slot: Slot) -> Option<&'t str> {
        self.get(slot).map(|capture| capture.as_str())
    }

    /// Like [`SlotCaptures::text`], treating an empty capture as absent
    pub fn non_empty(&self, slot: Slot) -> Option<&'t str> {
        self.text(slot).filter(|text| !text.is_empty())
    }
}
