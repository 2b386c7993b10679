//! Rendering of diffstat and diff blocks that follow a log record
//!
//! The washer hands every diff block it finds to a [`DiffWasher`] and
//! takes back finished lines. [`DiffstatWasher`] is the built-in one: it
//! faces file headers, hunk markers and added/removed lines the way
//! `git diff` colors them, and splits diffstat graphs into their `+` and
//! `-` runs.

use crate::artifacts::graph::ansi::StyledString;
use crate::artifacts::log::render::{ContinuationKind, Face, LineKind, RenderedLine};

const HEADER_PREFIXES: [&str; 10] = [
    "diff ",
    "index ",
    "--- ",
    "+++ ",
    "new file mode ",
    "deleted file mode ",
    "old mode ",
    "new mode ",
    "similarity index ",
    "rename ",
];

pub trait DiffWasher {
    fn wash_diff(&self, lines: &[StyledString]) -> Vec<RenderedLine>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiffstatWasher;

impl DiffWasher for DiffstatWasher {
    fn wash_diff(&self, lines: &[StyledString]) -> Vec<RenderedLine> {
        lines.iter().map(render_diff_line).collect()
    }
}

fn render_diff_line(line: &StyledString) -> RenderedLine {
    let mut rendered = RenderedLine::new(LineKind::Continuation(ContinuationKind::Diff));
    let text = line.text();

    if let Some(graph_start) = diffstat_graph_start(text) {
        rendered.push_styled(&line.slice(0..graph_start), Face::Plain);
        push_diffstat_graph(&mut rendered, &line.slice(graph_start..line.len()));
        return rendered;
    }

    let face = if HEADER_PREFIXES.iter().any(|prefix| text.starts_with(prefix)) {
        Face::DiffHeader
    } else if text.starts_with("@@") {
        Face::DiffHunk
    } else if text.starts_with('+') {
        Face::DiffAdded
    } else if text.starts_with('-') {
        Face::DiffRemoved
    } else {
        Face::Plain
    };
    rendered.push_styled(line, face);
    rendered
}

/// Byte offset of the `+`/`-` graph in a ` path | 12 ++--` diffstat line
fn diffstat_graph_start(text: &str) -> Option<usize> {
    let bar = text.rfind('|')?;
    let stat = &text[bar + 1..];
    let stat = stat.trim_start();

    let digits = stat.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let graph = stat[digits..].strip_prefix(' ').unwrap_or(&stat[digits..]);
    if !graph.chars().all(|ch| ch == '+' || ch == '-') {
        return None;
    }

    Some(text.len() - graph.len())
}

fn push_diffstat_graph(rendered: &mut RenderedLine, graph: &StyledString) {
    let added = graph.text().chars().take_while(|ch| *ch == '+').count();

    rendered.push_styled(&graph.slice(0..added), Face::DiffAdded);
    rendered.push_styled(&graph.slice(added..graph.len()), Face::DiffRemoved);
}
