use crate::RecordStyle;
use crate::artifacts::diff::{DiffWasher, DiffstatWasher};
use crate::artifacts::log::options::WashOptions;
use crate::artifacts::log::record::{CommitRecord, LoadMore, LogEntry, WashState};
use crate::artifacts::log::render::RenderedLine;
use crate::artifacts::log::washer::LineWasher;
use crate::artifacts::margin::MarginSpec;
use crate::artifacts::margin::annotator::MarginAnnotator;
use crate::errors::WashError;

/// Gap between the widest line and the margin column
const MARGIN_GAP: &str = "  ";

pub struct LogWashingEngine {
    margin: MarginSpec,
    options: WashOptions,
    diff_washer: Box<dyn DiffWasher>,
    now: i64,
}

impl LogWashingEngine {
    pub fn new(margin: MarginSpec, options: WashOptions) -> Self {
        LogWashingEngine {
            margin,
            options,
            diff_washer: Box::new(DiffstatWasher),
            now: chrono::Utc::now().timestamp(),
        }
    }

    pub fn with_diff_washer(self, diff_washer: Box<dyn DiffWasher>) -> Self {
        LogWashingEngine {
            diff_washer,
            ..self
        }
    }

    /// Fix the instant ages are measured from
    pub fn with_now(self, now: i64) -> Self {
        LogWashingEngine { now, ..self }
    }

    pub fn margin(&self) -> &MarginSpec {
        &self.margin
    }

    pub fn options(&self) -> &WashOptions {
        &self.options
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn wash(&self, raw: String, style: RecordStyle) -> Result<WashOutput, WashError> {
        self.wash_with_margin(raw, style, &self.margin)
    }

    /// Wash with a margin other than the engine's own
    pub fn wash_with_margin(
        &self,
        raw: String,
        style: RecordStyle,
        margin: &MarginSpec,
    ) -> Result<WashOutput, WashError> {
        if let Err(error) = margin.check_width() {
            tracing::warn!(%error, "margin is narrower than a duration, annotations will be cut short");
        }

        let washed = LineWasher::new(style, &self.options, self.diff_washer.as_ref())?.wash(raw)?;
        let annotator = MarginAnnotator::new(margin, self.now);
        let margins = washed
            .lines
            .iter()
            .map(|line| annotator.resolve(&line.margin))
            .collect();

        Ok(WashOutput {
            entries: washed.entries,
            lines: washed.lines,
            margins,
            state: washed.state,
        })
    }
}

/// Everything a wash pass produced
///
/// `margins` runs parallel to `lines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WashOutput {
    pub entries: Vec<LogEntry>,
    pub lines: Vec<RenderedLine>,
    pub margins: Vec<Option<String>>,
    pub state: WashState,
}

impl WashOutput {
    pub fn records(&self) -> impl Iterator<Item = &CommitRecord> {
        self.entries.iter().filter_map(LogEntry::as_commit)
    }

    pub fn sentinel(&self) -> Option<LoadMore> {
        self.entries.iter().find_map(|entry| match entry {
            LogEntry::LoadMore(load_more) => Some(*load_more),
            LogEntry::Commit(_) => None,
        })
    }

    /// Lay the document out as text, margins aligned after the widest line
    pub fn to_text(&self, paint: bool) -> String {
        let width = self
            .lines
            .iter()
            .map(RenderedLine::width)
            .max()
            .unwrap_or(0);

        let mut text = String::new();
        for (line, margin) in self.lines.iter().zip(&self.margins) {
            let mut laid_out = if paint { line.painted() } else { line.text() };
            if let Some(margin) = margin {
                laid_out.push_str(&" ".repeat(width - line.width()));
                laid_out.push_str(MARGIN_GAP);
                laid_out.push_str(margin);
            }
            text.push_str(laid_out.trim_end());
            text.push('\n');
        }
        text
    }
}
