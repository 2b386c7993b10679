use crate::artifacts::margin::duration::format_duration;
use crate::artifacts::margin::{ELLIPSIS, MarginSource, MarginSpec};
use derive_new::new;

/// Renders margin strings relative to a fixed "now"
#[derive(Debug, Clone, new)]
pub struct MarginAnnotator<'s> {
    spec: &'s MarginSpec,
    now: i64,
}

impl MarginAnnotator<'_> {
    /// Seconds between `timestamp` and now, in either direction
    pub fn age(&self, timestamp: i64) -> u64 {
        self.now.abs_diff(timestamp)
    }

    pub fn duration(&self, timestamp: i64) -> String {
        format_duration(
            self.age(timestamp),
            self.spec.duration_table(),
            self.spec.unit_width(),
        )
    }

    /// Room left for the author once the duration, the gap and the glyph
    /// column are reserved
    pub fn author_width(&self) -> usize {
        self.spec
            .total_width()
            .saturating_sub(self.spec.duration_width() + 2)
    }

    pub fn filler(&self) -> String {
        " ".repeat(self.spec.total_width().saturating_sub(1))
    }

    /// Build the margin for one line
    ///
    /// - neither author nor date: blank filler, one column short of the total
    /// - date only: the duration plus the glyph column
    /// - author: author truncated to fit, then the duration (blank if absent)
    ///
    /// When the margin is too narrow for any author, the date-only form is
    /// used instead.
    pub fn annotate(&self, author: Option<&str>, timestamp: Option<i64>) -> String {
        match (author, timestamp) {
            (None, None) => self.filler(),
            (None, Some(timestamp)) => format!("{} ", self.duration(timestamp)),
            (Some(author), timestamp) => {
                let duration = match timestamp {
                    Some(timestamp) => self.duration(timestamp),
                    None => " ".repeat(self.spec.duration_width()),
                };
                match self.author_width() {
                    0 => format!("{duration} "),
                    width => format!("{} {duration} ", truncate_to_width(author, width)),
                }
            }
        }
    }

    pub fn resolve(&self, source: &MarginSource) -> Option<String> {
        match source {
            MarginSource::None => None,
            MarginSource::Filler => Some(self.filler()),
            MarginSource::Author { author, timestamp } => {
                Some(self.annotate(author.as_deref(), *timestamp))
            }
        }
    }
}

/// Pad `text` to `width` characters, or cut it and end with an ellipsis
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return format!("{text:<width$}");
    }
    if width == 0 {
        return String::new();
    }

    let mut truncated = text.chars().take(width - 1).collect::<String>();
    truncated.push(ELLIPSIS);
    truncated
}
