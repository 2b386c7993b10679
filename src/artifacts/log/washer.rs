use crate::RecordStyle;
use crate::artifacts::diff::DiffWasher;
use crate::artifacts::graph::ansi::{StyledString, resolve};
use crate::artifacts::log::body::{BodyScanner, Continuation};
use crate::artifacts::log::grammar::{RecordGrammar, Slot, SlotCaptures};
use crate::artifacts::log::options::{RenderFlags, WashOptions};
use crate::artifacts::log::record::{
    BisectVerdict, CherryMarker, CommitRecord, GpgStatus, LoadMore, LogEntry, SideMarker,
    WashState, parse_timestamp,
};
use crate::artifacts::log::ref_label::parse_ref_labels;
use crate::artifacts::log::render::{ContinuationKind, Face, LineKind, RenderedLine};
use crate::artifacts::margin::MarginSource;
use crate::artifacts::reflog::classify;
use crate::errors::WashError;
use std::ops::Range;

const KEYWORD_PREFIXES: [&str; 3] = ["fixup!", "squash!", "amend!"];

/// Result of one wash pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Washed {
    pub entries: Vec<LogEntry>,
    pub lines: Vec<RenderedLine>,
    pub state: WashState,
}

/// A physical line of the resolved block and where it starts
#[derive(Debug, Clone)]
struct SourceLines {
    offsets: Vec<usize>,
    lines: Vec<StyledString>,
}

impl SourceLines {
    /// Split on newlines; trailing blank lines carry nothing and are dropped
    fn split(block: &StyledString) -> Self {
        let mut offsets = Vec::new();
        let mut lines = Vec::new();
        let mut start = 0;
        for piece in block.text().split('\n') {
            let end = start + piece.len();
            offsets.push(start);
            lines.push(block.slice(start..end));
            start = end + 1;
        }
        while lines.last().is_some_and(|line| line.text().trim().is_empty()) {
            lines.pop();
            offsets.pop();
        }

        SourceLines { offsets, lines }
    }
}

pub struct LineWasher<'w> {
    style: RecordStyle,
    grammar: RecordGrammar,
    options: &'w WashOptions,
    diff_washer: &'w dyn DiffWasher,
}

impl<'w> LineWasher<'w> {
    pub fn new(
        style: RecordStyle,
        options: &'w WashOptions,
        diff_washer: &'w dyn DiffWasher,
    ) -> Result<Self, WashError> {
        Ok(LineWasher {
            style,
            grammar: RecordGrammar::compile(style)?,
            options,
            diff_washer,
        })
    }

    fn flag(&self, flag: RenderFlags) -> bool {
        self.options.flags.contains(flag)
    }

    fn is_log(&self) -> bool {
        self.style == RecordStyle::Log
    }

    /// Consume `raw` and re-segment it into records
    ///
    /// Every line must belong to a record of this washer's style; the first
    /// one that does not aborts the pass with a grammar mismatch.
    pub fn wash(&self, raw: String) -> Result<Washed, WashError> {
        let block = if self.flag(RenderFlags::RESOLVE_COLOR) {
            resolve(&raw)
        } else {
            StyledString::plain(raw)
        };
        let source = SourceLines::split(&block);
        let limit = self.options.limit.filter(|_| self.is_log());

        tracing::debug!(style = %self.style, lines = source.lines.len(), ?limit, "washing history output");

        let mut state = WashState::new(limit);
        let mut entries = Vec::new();
        let mut lines = Vec::new();
        let mut cursor = 0;

        while cursor < source.lines.len() {
            if state.at_limit() {
                tracing::debug!(
                    discarded = source.lines.len() - cursor,
                    "limit reached, dropping the rest of the output"
                );
                break;
            }

            let line = &source.lines[cursor];
            let captures = self.grammar.captures(line.text()).ok_or_else(|| {
                WashError::mismatch(self.style, cursor + 1, source.offsets[cursor], line.text())
            })?;
            cursor += 1;

            if self.style == RecordStyle::Reflog && captures.get(Slot::ReflogDate).is_none() {
                tracing::debug!(line = cursor, "skipping pruned reflog entry");
                continue;
            }

            state.records_emitted += 1;
            let mut record = self.build_record(&captures, &state);
            tracing::trace!(hash = %record.hash, index = entries.len(), "washed record");
            lines.push(self.render_heading(entries.len(), &record, &captures, line));

            if self.is_log() {
                let continuation = BodyScanner::new(
                    &source.lines[cursor..],
                    &self.grammar,
                    self.flag(RenderFlags::EXTENDED_HEADER),
                    record.graph_prefix.is_some(),
                )
                .scan();
                cursor += continuation.consumed;
                self.render_continuation(&mut record, continuation, &mut lines);
            }

            entries.push(LogEntry::Commit(record));
        }

        if let Some(limit) = state.limit.filter(|_| state.at_limit()) {
            state.limit_reached = true;
            entries.push(LogEntry::LoadMore(LoadMore { limit }));
            lines.push(sentinel_line(limit));
        }

        tracing::debug!(
            records = state.records_emitted,
            lines = lines.len(),
            limit_reached = state.limit_reached,
            "wash pass finished"
        );

        Ok(Washed {
            entries,
            lines,
            state,
        })
    }

    fn build_record(&self, captures: &SlotCaptures<'_>, state: &WashState) -> CommitRecord {
        let mut record = CommitRecord::new(
            captures.text(Slot::Hash).unwrap_or_default(),
            captures.text(Slot::Message).unwrap_or_default(),
        );

        record.refs = captures.non_empty(Slot::Refs).map(str::to_string);
        record.graph_prefix = captures.non_empty(Slot::Graph).map(str::to_string);
        record.author = match self.style {
            RecordStyle::Stash => Some(String::new()),
            _ => captures.non_empty(Slot::Author).map(str::to_string),
        };
        record.timestamp = captures
            .non_empty(Slot::Date)
            .or(captures.non_empty(Slot::ReflogDate))
            .and_then(|date| {
                let timestamp = parse_timestamp(date);
                if timestamp.is_none() {
                    tracing::debug!(date, hash = %record.hash, "unparsable date, margin shows no age");
                }
                timestamp
            });
        record.gpg_status = captures
            .text(Slot::GpgStatus)
            .and_then(|code| code.chars().next())
            .and_then(GpgStatus::from_code);
        record.cherry_marker = captures
            .text(Slot::CherryMarker)
            .and_then(CherryMarker::from_text);
        record.side_marker = captures
            .text(Slot::SideMarker)
            .and_then(SideMarker::from_text);

        let subject = captures.non_empty(Slot::ReflogSubject);
        match self.style {
            RecordStyle::Reflog => {
                record.reflog_index = Some(state.records_emitted - 1);
                record.reflog_subject = subject.map(|subject| classify(strip_subject(subject)));
            }
            RecordStyle::BisectLog => {
                record.bisect_verdict = subject.and_then(BisectVerdict::from_text);
            }
            _ => {}
        }

        record
    }

    fn render_heading(
        &self,
        index: usize,
        record: &CommitRecord,
        captures: &SlotCaptures<'_>,
        line: &StyledString,
    ) -> RenderedLine {
        let styled = |slot: Slot| captures.get(slot).map(|capture| line.slice(capture.range()));
        let mut rendered = RenderedLine::new(LineKind::Record(index));

        if let Some(marker) = record.cherry_marker {
            rendered.push(format!("{} ", marker.as_str()), Face::Cherry(marker));
        }
        if let Some(marker) = record.side_marker {
            rendered.push(format!("{} ", marker.as_str()), Face::Side(marker));
        }

        let graph = styled(Slot::Graph).filter(|graph| !graph.is_empty());
        let hash_first = self.flag(RenderFlags::ALIGN_HASH) || graph.is_none();
        if hash_first {
            self.push_hash(&mut rendered, record, styled(Slot::Hash));
        }
        if let Some(graph) = &graph {
            rendered.push_styled(&self.options.glyphs.translate(graph), Face::Graph);
        }
        if !hash_first {
            self.push_hash(&mut rendered, record, styled(Slot::Hash));
        }

        let refs_after = self.flag(RenderFlags::REFS_AFTER_MESSAGE);
        if !refs_after && self.push_refs(&mut rendered, record) {
            rendered.push(" ", Face::Plain);
        }

        if let Some(reflog_index) = record.reflog_index {
            rendered.push(format!("{reflog_index:<2} "), Face::Plain);
            if let Some(subject) = &record.reflog_subject {
                rendered.push(subject.padded(), Face::Reflog(subject.category()));
            }
        }
        if let Some(verdict) = record.bisect_verdict {
            rendered.push(format!("{}: ", verdict.as_str()), Face::Bisect(verdict));
        }

        if let Some(message) = styled(Slot::Message) {
            self.push_message(&mut rendered, &message);
        }

        if refs_after && record.refs.is_some() {
            rendered.push(" ", Face::Plain);
            self.push_refs(&mut rendered, record);
        }

        rendered.with_margin(self.heading_margin(record))
    }

    fn push_hash(
        &self,
        rendered: &mut RenderedLine,
        record: &CommitRecord,
        hash: Option<StyledString>,
    ) {
        let face = record.gpg_status.map_or(Face::Hash, Face::Signature);
        let hash = hash.unwrap_or_else(|| StyledString::plain(record.hash.as_str()));
        let padding = self
            .options
            .abbrev_length
            .saturating_sub(hash.text().chars().count());

        rendered.push_styled(&hash, face);
        rendered.push(" ".repeat(padding + 1), Face::Plain);
    }

    /// Returns whether any label was written
    fn push_refs(&self, rendered: &mut RenderedLine, record: &CommitRecord) -> bool {
        let Some(refs) = &record.refs else {
            return false;
        };
        let labels = parse_ref_labels(refs, &self.options.remotes);

        for (position, label) in labels.iter().enumerate() {
            if position > 0 {
                rendered.push(" ", Face::Plain);
            }
            rendered.push(label.name.as_str(), Face::Ref(label.kind));
        }
        !labels.is_empty()
    }

    fn push_message(&self, rendered: &mut RenderedLine, message: &StyledString) {
        if !self.flag(RenderFlags::HIGHLIGHT_KEYWORDS) {
            rendered.push_styled(message, Face::Plain);
            return;
        }

        let mut position = 0;
        for keyword in keyword_ranges(message.text()) {
            rendered.push_styled(&message.slice(position..keyword.start), Face::Plain);
            rendered.push(&message.text()[keyword.clone()], Face::Keyword);
            position = keyword.end;
        }
        rendered.push_styled(&message.slice(position..message.len()), Face::Plain);
    }

    fn heading_margin(&self, record: &CommitRecord) -> MarginSource {
        if !self.flag(RenderFlags::SHOW_MARGIN) || !self.style.has_margin() {
            return MarginSource::None;
        }
        MarginSource::Author {
            author: record.author.clone(),
            timestamp: record.timestamp,
        }
    }

    fn continuation_margin(&self) -> MarginSource {
        if self.flag(RenderFlags::SHOW_MARGIN) {
            MarginSource::Filler
        } else {
            MarginSource::None
        }
    }

    fn render_continuation(
        &self,
        record: &mut CommitRecord,
        continuation: Continuation,
        lines: &mut Vec<RenderedLine>,
    ) {
        let indent = if self.flag(RenderFlags::ALIGN_HASH) {
            " ".repeat(self.options.abbrev_length + 1)
        } else {
            String::new()
        };
        let margin = self.continuation_margin();
        let line = |kind: ContinuationKind| {
            let mut rendered = RenderedLine::new(LineKind::Continuation(kind));
            rendered.push(indent.as_str(), Face::Plain);
            rendered
        };

        for header in &continuation.header {
            let mut rendered = line(ContinuationKind::Header);
            rendered.push_styled(header, Face::Plain);
            lines.push(rendered.with_margin(margin.clone()));
            record.header.push(header.text().to_string());
        }

        let diff = self.diff_washer.wash_diff(&continuation.diff);
        lines.extend(diff.into_iter().map(|rendered| rendered.with_margin(margin.clone())));
        record
            .diff
            .extend(continuation.diff.iter().map(|line| line.text().to_string()));

        for message in &continuation.message {
            let kind = if message.is_graph_only() {
                ContinuationKind::Graph
            } else {
                record.body.push(message.text.text().to_string());
                ContinuationKind::Message
            };
            let mut rendered = line(kind);
            rendered.push_styled(&self.options.glyphs.translate(&message.graph), Face::Graph);
            rendered.push_styled(&message.text, Face::Plain);
            lines.push(rendered.with_margin(margin.clone()));
        }

        if let Some(separator) = continuation.separator {
            let rendered = if separator.is_empty() {
                RenderedLine::new(LineKind::Continuation(ContinuationKind::Graph))
            } else {
                let mut rendered = line(ContinuationKind::Graph);
                rendered.push_styled(&self.options.glyphs.translate(&separator), Face::Graph);
                rendered
            };
            lines.push(rendered.with_margin(margin));
        }
    }
}

fn sentinel_line(limit: usize) -> RenderedLine {
    let mut rendered = RenderedLine::new(LineKind::Sentinel);
    rendered.push(
        format!("... more history beyond the first {limit} commits"),
        Face::Button,
    );
    rendered
}

/// Drop the grammar's trailing `": "`, or the lone trailing space of
/// colon-less subjects such as `merge `
fn strip_subject(subject: &str) -> &str {
    let suffix = if subject.contains(':') { 2 } else { 1 };
    subject
        .get(..subject.len().saturating_sub(suffix))
        .unwrap_or_default()
}

/// Byte ranges of `fixup!`-style prefixes and `[bracketed]` tags
fn keyword_ranges(message: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut position = 0;

    if let Some(prefix) = KEYWORD_PREFIXES
        .iter()
        .find(|prefix| message.starts_with(*prefix))
    {
        ranges.push(0..prefix.len());
        position = prefix.len();
    }

    while let Some(open) = message[position..].find('[').map(|open| position + open) {
        let Some(close) = message[open + 1..]
            .find(['[', ']'])
            .map(|close| open + 1 + close)
        else {
            break;
        };
        if message[close..].starts_with(']') && close > open + 1 {
            ranges.push(open..close + 1);
            position = close + 1;
        } else {
            position = close;
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::DiffstatWasher;
    use crate::artifacts::graph::GraphGlyphTranslator;
    use crate::artifacts::reflog::ReflogCategory;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn wash_with(style: RecordStyle, options: &WashOptions, raw: &str) -> Result<Washed, WashError> {
        LineWasher::new(style, options, &DiffstatWasher)?.wash(raw.to_string())
    }

    fn wash(style: RecordStyle, raw: &str) -> Washed {
        wash_with(style, &WashOptions::default(), raw).unwrap()
    }

    fn records(washed: &Washed) -> Vec<&CommitRecord> {
        washed
            .entries
            .iter()
            .filter_map(LogEntry::as_commit)
            .collect()
    }

    fn texts(washed: &Washed) -> Vec<String> {
        washed.lines.iter().map(RenderedLine::text).collect()
    }

    #[test]
    fn plain_log_line() {
        let washed = wash(RecordStyle::Log, "abc123 [Jane Doe][1700000000]Fix bug\n");

        let record = records(&washed)[0];
        assert_eq!(record.hash, "abc123");
        assert_eq!(record.author.as_deref(), Some("Jane Doe"));
        assert_eq!(record.timestamp, Some(1_700_000_000));
        assert_eq!(record.message, "Fix bug");
        assert_eq!(record.refs, None);
        assert_eq!(record.gpg_status, None);
        assert_eq!(texts(&washed), vec!["abc123  Fix bug"]);
        assert_eq!(
            washed.lines[0].margin,
            MarginSource::Author {
                author: Some("Jane Doe".into()),
                timestamp: Some(1_700_000_000)
            }
        );
        assert_eq!(washed.state.records_emitted, 1);
        assert!(!washed.state.limit_reached);
    }

    #[test]
    fn refs_and_signature() {
        let washed = wash(
            RecordStyle::Log,
            "abc1234 (HEAD -> main, origin/main) G[Jane][1700000000]Ship it",
        );

        let record = records(&washed)[0];
        assert_eq!(record.refs.as_deref(), Some("(HEAD -> main, origin/main)"));
        assert_eq!(record.gpg_status, Some(GpgStatus::Good));
        assert_eq!(texts(&washed), vec!["abc1234 HEAD main origin/main Ship it"]);
        assert_eq!(
            washed.lines[0].segments[0].face,
            Face::Signature(GpgStatus::Good)
        );
    }

    #[test]
    fn refs_after_message() {
        let options = WashOptions::default()
            .with_flags(RenderFlags::default() | RenderFlags::REFS_AFTER_MESSAGE);

        let washed = wash_with(
            RecordStyle::Log,
            &options,
            "abc1234 (tag: v1.0) [Jane][1700000000]Release",
        )
        .unwrap();

        assert_eq!(texts(&washed), vec!["abc1234 Release v1.0"]);
    }

    #[test]
    fn graph_renders_after_the_hash_when_aligned() {
        let washed = wash(RecordStyle::Log, "* abc1234 [Jane][1700000000]Top");

        assert_eq!(texts(&washed), vec!["abc1234 * Top"]);
        assert_eq!(records(&washed)[0].graph_prefix.as_deref(), Some("* "));
    }

    #[test]
    fn graph_renders_first_without_alignment_and_is_translated() {
        let options = WashOptions {
            flags: RenderFlags::empty(),
            glyphs: GraphGlyphTranslator::new(),
            ..Default::default()
        };

        let washed = wash_with(
            RecordStyle::Log,
            &options,
            "* abc1234 [Jane][1700000000]Top\n| Body\n* def5678 [Jane][1700000000]Next",
        )
        .unwrap();

        assert_eq!(texts(&washed), vec!["◆ abc1234 Top", "│ Body", "│", "◆ def5678 Next"]);
        assert_eq!(washed.lines[1].margin, MarginSource::None);
    }

    #[test]
    fn message_body_is_indented_under_the_hash() {
        let washed = wash(
            RecordStyle::Log,
            "abc1234 [Jane][1700000000]Subject\n\nDetails here.\ndef5678 [Jane][1700000000]Next",
        );

        assert_eq!(
            texts(&washed),
            vec![
                "abc1234 Subject",
                "        ",
                "        Details here.",
                "",
                "def5678 Next",
            ]
        );
        let record = records(&washed)[0];
        assert_eq!(record.body, vec!["".to_string(), "Details here.".to_string()]);
        assert_eq!(washed.lines[2].margin, MarginSource::Filler);
        assert_eq!(
            washed.lines[3].kind,
            LineKind::Continuation(ContinuationKind::Graph)
        );
        assert_eq!(washed.entries.len(), 2);
    }

    #[test]
    fn diffstat_goes_to_the_diff_washer() {
        let washed = wash(
            RecordStyle::Log,
            "abc1234 [Jane][1700000000]Subject\n---\n src/lib.rs | 2 +-\n 1 file changed",
        );

        let record = records(&washed)[0];
        assert_eq!(record.diff, vec![" src/lib.rs | 2 +-", " 1 file changed"]);
        assert!(record.body.is_empty());
        assert_eq!(
            washed.lines[1].kind,
            LineKind::Continuation(ContinuationKind::Diff)
        );
        assert_eq!(washed.lines[1].margin, MarginSource::Filler);
    }

    #[test]
    fn extended_header_lines_are_kept_on_the_record() {
        let options = WashOptions::default()
            .with_flags(RenderFlags::default() | RenderFlags::EXTENDED_HEADER);

        let washed = wash_with(
            RecordStyle::Log,
            &options,
            "abc1234 [Jane][1700000000]Subject\n\x0cAuthor: Jane\nCommit: John\x0c",
        )
        .unwrap();

        let record = records(&washed)[0];
        assert_eq!(record.header, vec!["Author: Jane", "Commit: John"]);
        assert_eq!(texts(&washed)[1], "        Author: Jane");
    }

    #[test]
    fn limit_appends_a_sentinel() {
        let options = WashOptions::default().with_limit(Some(2));

        let washed = wash_with(
            RecordStyle::Log,
            &options,
            "a1 [J][1]One\nb2 [J][2]Two\nc3 [J][3]Three",
        )
        .unwrap();

        assert_eq!(records(&washed).len(), 2);
        assert_eq!(washed.entries.last(), Some(&LogEntry::LoadMore(LoadMore { limit: 2 })));
        assert_eq!(washed.lines.last().map(|line| line.kind), Some(LineKind::Sentinel));
        assert!(washed.state.limit_reached);
    }

    #[test]
    fn zero_limit_yields_only_the_sentinel() {
        let options = WashOptions::default().with_limit(Some(0));

        let washed = wash_with(RecordStyle::Log, &options, "a1 [J][1]One").unwrap();

        assert_eq!(washed.entries, vec![LogEntry::LoadMore(LoadMore { limit: 0 })]);
        assert_eq!(washed.state.records_emitted, 0);
    }

    #[test]
    fn limit_is_ignored_outside_the_log_style() {
        let options = WashOptions::default().with_limit(Some(1));

        let washed = wash_with(RecordStyle::Cherry, &options, "+ a1 One\n- b2 Two").unwrap();

        assert_eq!(washed.entries.len(), 2);
        assert!(!washed.state.limit_reached);
    }

    #[test]
    fn cherry_markers() {
        let washed = wash(RecordStyle::Cherry, "+ abc1234 New\n- def5678 Upstream");

        let records = records(&washed);
        assert_eq!(records[0].cherry_marker, Some(CherryMarker::Unmatched));
        assert_eq!(records[1].cherry_marker, Some(CherryMarker::Applied));
        assert_eq!(texts(&washed), vec!["+ abc1234 New", "- def5678 Upstream"]);
        assert_eq!(washed.lines[0].margin, MarginSource::None);
    }

    #[test]
    fn module_side_markers() {
        let washed = wash(RecordStyle::Module, "< abc1234 Old\n> def5678 New\n0123456 Plain");

        let records = records(&washed);
        assert_eq!(records[0].side_marker, Some(SideMarker::Left));
        assert_eq!(records[1].side_marker, Some(SideMarker::Right));
        assert_eq!(records[2].side_marker, None);
    }

    #[test]
    fn reflog_entries_are_indexed_and_classified() {
        let washed = wash(
            RecordStyle::Reflog,
            "abc1234 HEAD@{1700000000 +0000} commit (amend): Fix typo\n\
             def5678 HEAD@{1699990000 +0000} checkout: moving from main to topic\n\
             0123456 HEAD@{1699980000 +0000} merge topic: Fast-forward",
        );

        let records = records(&washed);
        assert_eq!(records[0].reflog_index, Some(0));
        assert_eq!(records[0].reflog_category_label(), Some("amend"));
        assert_eq!(records[0].message, "Fix typo");
        assert_eq!(records[1].reflog_index, Some(1));
        assert_eq!(records[1].reflog_category_label(), Some("checkout"));
        assert_eq!(records[2].reflog_subject.as_ref().map(|s| s.category()), Some(ReflogCategory::Merge));
        assert_eq!(records[2].message, "topic: Fast-forward");
        assert_eq!(texts(&washed)[0], "abc1234 0  amend            Fix typo");
        assert_eq!(
            washed.lines[0].margin,
            MarginSource::Author {
                author: None,
                timestamp: Some(1_700_000_000)
            }
        );
    }

    #[test]
    fn pruned_reflog_entries_are_skipped() {
        let washed = wash(
            RecordStyle::Reflog,
            "abc1234 \ndef5678 HEAD@{1700000000 +0000} reset: moving to HEAD~",
        );

        let records = records(&washed);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hash, "def5678");
        assert_eq!(records[0].reflog_index, Some(0));
    }

    #[test]
    fn reflog_without_subject() {
        let washed = wash(RecordStyle::Reflog, "abc1234 HEAD@{1700000000 +0000}");

        let record = records(&washed)[0];
        assert_eq!(record.message, "");
        assert_eq!(record.reflog_subject, None);
    }

    #[test]
    fn stash_entries_carry_a_blank_author() {
        let washed = wash(RecordStyle::Stash, "stash@{0} 1700000000 WIP on main: abc123 Fix");

        let record = records(&washed)[0];
        assert_eq!(record.hash, "stash@{0}");
        assert_eq!(record.author.as_deref(), Some(""));
        assert_eq!(record.timestamp, Some(1_700_000_000));
        assert_eq!(record.message, "WIP on main: abc123 Fix");
    }

    #[test]
    fn bisect_log_verdicts() {
        let washed = wash(
            RecordStyle::BisectLog,
            "# bad: [abc1234] Break it\n# good: [def5678] Works",
        );

        let records = records(&washed);
        assert_eq!(records[0].bisect_verdict, Some(BisectVerdict::Bad));
        assert_eq!(records[1].bisect_verdict, Some(BisectVerdict::Good));
        assert_eq!(texts(&washed)[0], "abc1234 bad: Break it");
    }

    #[test]
    fn bisect_visual_with_graph_and_refs() {
        let washed = wash(RecordStyle::BisectVisual, "* abc1234 (refs/bisect/bad) Break it");

        let record = records(&washed)[0];
        assert_eq!(record.graph_prefix.as_deref(), Some("* "));
        assert_eq!(record.refs.as_deref(), Some("(refs/bisect/bad)"));
        assert_eq!(record.message, "Break it");
    }

    #[test]
    fn mismatch_reports_line_and_offset() {
        let error = wash_with(
            RecordStyle::Cherry,
            &WashOptions::default(),
            "+ abc1234 Fine\nnot a cherry line",
        )
        .unwrap_err();

        match error {
            WashError::GrammarMismatch {
                style,
                line,
                offset,
                snippet,
            } => {
                assert_eq!(style, RecordStyle::Cherry);
                assert_eq!(line, 2);
                assert_eq!(offset, 15);
                assert_eq!(snippet, "not a cherry line");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn colored_graph_is_resolved_before_matching() {
        let options = WashOptions::default()
            .with_flags(RenderFlags::default() | RenderFlags::RESOLVE_COLOR);

        let washed = wash_with(
            RecordStyle::Log,
            &options,
            "\x1b[31m*\x1b[m abc1234 [Jane][1700000000]Colored\n\x1b[31m|\x1b[m Body",
        )
        .unwrap();

        assert_eq!(records(&washed)[0].graph_prefix.as_deref(), Some("* "));
        assert_eq!(texts(&washed)[0], "abc1234 * Colored");
        assert!(matches!(washed.lines[0].segments[2].face, Face::Ansi(_)));
    }

    #[test]
    fn keywords_are_highlighted() {
        let washed = wash(RecordStyle::Log, "abc1234 [Jane][1]fixup! [WIP] tidy");

        let keywords = washed.lines[0]
            .segments
            .iter()
            .filter(|segment| segment.face == Face::Keyword)
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keywords, vec!["fixup!", "[WIP]"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let washed = wash(RecordStyle::Log, "\n\n");

        assert!(washed.entries.is_empty());
        assert!(washed.lines.is_empty());
    }

    #[rstest]
    #[case("checkout: ", "checkout")]
    #[case("commit (amend): ", "commit (amend)")]
    #[case("merge ", "merge")]
    #[case("autosave ", "autosave")]
    fn subject_separators_are_stripped(#[case] subject: &str, #[case] expected: &str) {
        assert_eq!(strip_subject(subject), expected);
    }

    #[rstest]
    #[case("plain message", vec![])]
    #[case("squash! earlier", vec![0..7])]
    #[case("[a] and [b]", vec![0..3, 8..11])]
    #[case("[] empty [x", vec![])]
    #[case("[[nested]]", vec![1..9])]
    fn keyword_scanning(#[case] message: &str, #[case] expected: Vec<Range<usize>>) {
        assert_eq!(keyword_ranges(message), expected);
    }

    fn record_line(style: RecordStyle, index: usize, hash: &str) -> String {
        match style {
            RecordStyle::Log => format!("{hash} [Author {index}][{}]Message {index}", 1_700_000_000 + index),
            RecordStyle::Cherry => format!("+ {hash} Message {index}"),
            RecordStyle::Module => format!("> {hash} Message {index}"),
            RecordStyle::Reflog => format!("{hash} HEAD@{{{} +0000}} commit: Message {index}", 1_700_000_000 + index),
            RecordStyle::Stash => format!("{hash} {} Message {index}", 1_700_000_000 + index),
            RecordStyle::BisectVisual => format!("{hash} Message {index}"),
            RecordStyle::BisectLog => format!("# good: [{hash}] Message {index}"),
        }
    }

    proptest! {
        #[test]
        fn prop_every_style_preserves_hashes_in_order(
            hashes in prop::collection::vec("[0-9a-f]{7,40}", 0..12),
            style_index in 0usize..RecordStyle::ALL.len(),
        ) {
            let style = RecordStyle::ALL[style_index];
            let raw = hashes
                .iter()
                .enumerate()
                .map(|(index, hash)| record_line(style, index, hash))
                .collect::<Vec<_>>()
                .join("\n");

            let washed = wash(style, &raw);
            let washed_hashes = records(&washed)
                .iter()
                .map(|record| record.hash.clone())
                .collect::<Vec<_>>();

            prop_assert_eq!(washed_hashes, hashes);
        }
    }
}
