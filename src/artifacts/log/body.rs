//! Continuation of a log record past its heading line
//!
//! What follows a heading is scanned by a small state machine:
//!
//! ```text
//! AtHeading --\x0c--> InHeader --line with \x0c--> AfterHeader
//!     |                                              |
//!     +----------------------+-----------------------+
//!                            |
//!        "---", or blank + " "/"diff"  --> InDiff    --> Done
//!        anything else                 --> InMessage --> Done
//! ```
//!
//! Every state stops at the next line the record grammar accepts, so a
//! record never swallows its successor's heading.

use crate::artifacts::graph::ansi::StyledString;
use crate::artifacts::log::grammar::RecordGrammar;
use derive_new::new;

const HEADER_DELIMITER: char = '\x0c';
const SEPARATOR_BREAKERS: [char; 3] = ['/', '\\', '.'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    AtHeading,
    InHeader,
    AfterHeader,
    InDiff,
    InMessage,
    Done,
}

/// A message line split into its graph prefix and text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine {
    pub graph: StyledString,
    pub text: StyledString,
}

impl MessageLine {
    fn split(line: &StyledString, graph: bool) -> Self {
        let prefix = if graph { graph_prefix_len(line.text()) } else { 0 };

        MessageLine {
            graph: line.slice(0..prefix),
            text: line.slice(prefix..line.len()),
        }
    }

    pub fn is_graph_only(&self) -> bool {
        self.text.text().trim().is_empty() && !self.graph.text().trim().is_empty()
    }

    fn is_blank(&self) -> bool {
        self.text.text().trim().is_empty() && self.graph.text().trim().is_empty()
    }
}

/// Lines following a heading, grouped by what they turned out to be
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Continuation {
    pub header: Vec<StyledString>,
    pub diff: Vec<StyledString>,
    pub message: Vec<MessageLine>,
    /// Separator to insert after the message when the output omitted one
    pub separator: Option<StyledString>,
    /// Raw lines used up, including dropped scaffolding
    pub consumed: usize,
}

#[derive(Debug, new)]
pub struct BodyScanner<'a> {
    lines: &'a [StyledString],
    grammar: &'a RecordGrammar,
    extended_header: bool,
    graph: bool,
}

impl BodyScanner<'_> {
    pub fn scan(&self) -> Continuation {
        let mut continuation = Continuation::default();
        let mut state = BodyState::AtHeading;

        while state != BodyState::Done {
            state = match state {
                BodyState::AtHeading => self.at_heading(&mut continuation),
                BodyState::InHeader => self.in_header(&mut continuation),
                BodyState::AfterHeader => self.after_header(&mut continuation),
                BodyState::InDiff => self.in_diff(&mut continuation),
                BodyState::InMessage => self.in_message(&mut continuation),
                BodyState::Done => BodyState::Done,
            };
        }

        continuation
    }

    /// The next unconsumed line, unless it starts another record
    fn peek(&self, continuation: &Continuation) -> Option<&StyledString> {
        self.lines
            .get(continuation.consumed)
            .filter(|line| !self.grammar.is_match(line.text()))
    }

    fn at_heading(&self, continuation: &mut Continuation) -> BodyState {
        let Some(line) = self.peek(continuation) else {
            return BodyState::Done;
        };
        if !self.extended_header || !line.text().starts_with(HEADER_DELIMITER) {
            return BodyState::AfterHeader;
        }

        continuation.consumed += 1;
        let opening = line.slice(HEADER_DELIMITER.len_utf8()..line.len());
        match opening.text().find(HEADER_DELIMITER) {
            Some(end) => {
                push_header(continuation, opening.slice(0..end));
                BodyState::AfterHeader
            }
            None => {
                push_header(continuation, opening);
                BodyState::InHeader
            }
        }
    }

    fn in_header(&self, continuation: &mut Continuation) -> BodyState {
        let Some(line) = self.peek(continuation) else {
            return BodyState::Done;
        };

        continuation.consumed += 1;
        match line.text().find(HEADER_DELIMITER) {
            Some(end) => {
                push_header(continuation, line.slice(0..end));
                BodyState::AfterHeader
            }
            None => {
                push_header(continuation, line.clone());
                BodyState::InHeader
            }
        }
    }

    fn after_header(&self, continuation: &mut Continuation) -> BodyState {
        let Some(line) = self.peek(continuation) else {
            return BodyState::Done;
        };
        let text = line.text();

        if text.starts_with("---") {
            continuation.consumed += 1;
            return BodyState::InDiff;
        }
        let diff_follows = self
            .lines
            .get(continuation.consumed + 1)
            .is_some_and(|next| next.text().starts_with(' ') || next.text().starts_with("diff"));
        if text.is_empty() && diff_follows {
            continuation.consumed += 1;
            return BodyState::InDiff;
        }

        BodyState::InMessage
    }

    fn in_diff(&self, continuation: &mut Continuation) -> BodyState {
        while let Some(line) = self.peek(continuation) {
            continuation.diff.push(line.clone());
            continuation.consumed += 1;
        }
        BodyState::Done
    }

    fn in_message(&self, continuation: &mut Continuation) -> BodyState {
        while let Some(line) = self.peek(continuation) {
            continuation.message.push(MessageLine::split(line, self.graph));
            continuation.consumed += 1;
        }
        while continuation.message.last().is_some_and(MessageLine::is_blank) {
            continuation.message.pop();
        }

        continuation.separator = continuation
            .message
            .last()
            .filter(|last| !last.text.text().trim().is_empty())
            .map(|last| &last.graph)
            .filter(|graph| !graph.text().contains(SEPARATOR_BREAKERS))
            .map(|graph| graph.slice(0..graph.text().trim_end().len()));

        BodyState::Done
    }
}

fn push_header(continuation: &mut Continuation, line: StyledString) {
    if !line.is_empty() {
        continuation.header.push(line);
    }
}

/// Length of the leading run of graph characters
pub fn graph_prefix_len(text: &str) -> usize {
    text.find(|ch: char| !matches!(ch, '|' | '/' | '\\' | '_' | ' '))
        .unwrap_or(text.len())
}
