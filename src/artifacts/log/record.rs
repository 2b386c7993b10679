use crate::artifacts::reflog::ReflogSubject;
use chrono::FixedOffset;
use colored::{ColoredString, Colorize};

/// Signature verification result, as reported by `%G?`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpgStatus {
    Good,
    Bad,
    Untrusted,
    Expired,
    ExpiredKey,
    Revoked,
    Error,
    None,
}

impl GpgStatus {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'G' => Some(GpgStatus::Good),
            'B' => Some(GpgStatus::Bad),
            'U' => Some(GpgStatus::Untrusted),
            'X' => Some(GpgStatus::Expired),
            'Y' => Some(GpgStatus::ExpiredKey),
            'R' => Some(GpgStatus::Revoked),
            'E' => Some(GpgStatus::Error),
            'N' => Some(GpgStatus::None),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            GpgStatus::Good => 'G',
            GpgStatus::Bad => 'B',
            GpgStatus::Untrusted => 'U',
            GpgStatus::Expired => 'X',
            GpgStatus::ExpiredKey => 'Y',
            GpgStatus::Revoked => 'R',
            GpgStatus::Error => 'E',
            GpgStatus::None => 'N',
        }
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            GpgStatus::Good => text.green(),
            GpgStatus::Bad => text.red().bold(),
            GpgStatus::Untrusted => text.cyan(),
            GpgStatus::Expired | GpgStatus::ExpiredKey => text.yellow().dimmed(),
            GpgStatus::Revoked => text.magenta(),
            GpgStatus::Error => text.red(),
            GpgStatus::None => text.yellow(),
        }
    }
}

/// `git cherry` marker: `-` has an equivalent upstream, `+` does not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CherryMarker {
    Applied,
    Unmatched,
}

impl CherryMarker {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "-" => Some(CherryMarker::Applied),
            "+" => Some(CherryMarker::Unmatched),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CherryMarker::Applied => "-",
            CherryMarker::Unmatched => "+",
        }
    }
}

/// Which side of a symmetric range a submodule commit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideMarker {
    Left,
    Right,
}

impl SideMarker {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "<" => Some(SideMarker::Left),
            ">" => Some(SideMarker::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SideMarker::Left => "<",
            SideMarker::Right => ">",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BisectVerdict {
    Bad,
    Skip,
    Good,
}

impl BisectVerdict {
    /// Parse the `bad:`/`skip:`/`good:` prefix of a bisect log line
    pub fn from_text(text: &str) -> Option<Self> {
        match text.trim_end().trim_end_matches(':') {
            "bad" => Some(BisectVerdict::Bad),
            "skip" => Some(BisectVerdict::Skip),
            "good" => Some(BisectVerdict::Good),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BisectVerdict::Bad => "bad",
            BisectVerdict::Skip => "skip",
            BisectVerdict::Good => "good",
        }
    }
}

/// One record, built from a matched heading line plus its continuation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub refs: Option<String>,
    pub graph_prefix: Option<String>,
    pub author: Option<String>,
    pub timestamp: Option<i64>,
    pub gpg_status: Option<GpgStatus>,
    pub cherry_marker: Option<CherryMarker>,
    pub side_marker: Option<SideMarker>,
    pub reflog_index: Option<usize>,
    pub reflog_subject: Option<ReflogSubject>,
    pub bisect_verdict: Option<BisectVerdict>,
    pub header: Vec<String>,
    pub body: Vec<String>,
    pub diff: Vec<String>,
}

impl CommitRecord {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        CommitRecord {
            hash: hash.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn reflog_category_label(&self) -> Option<&'static str> {
        self.reflog_subject
            .as_ref()
            .map(|subject| subject.category().as_str())
    }

    /// The single style-specific marker a record carries, if any
    pub fn marker(&self) -> Option<&'static str> {
        self.cherry_marker
            .map(|marker| marker.as_str())
            .or(self.side_marker.map(|marker| marker.as_str()))
            .or(self.bisect_verdict.map(|verdict| verdict.as_str()))
            .or(self.reflog_category_label())
    }
}

/// Terminal entry appended when a log pass stopped at its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMore {
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Commit(CommitRecord),
    LoadMore(LoadMore),
}

impl LogEntry {
    pub fn as_commit(&self) -> Option<&CommitRecord> {
        match self {
            LogEntry::Commit(record) => Some(record),
            LogEntry::LoadMore(_) => None,
        }
    }
}

/// Counters of a single wash pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WashState {
    pub records_emitted: usize,
    pub limit: Option<usize>,
    pub limit_reached: bool,
}

impl WashState {
    pub fn new(limit: Option<usize>) -> Self {
        WashState {
            records_emitted: 0,
            limit,
            limit_reached: false,
        }
    }

    pub fn at_limit(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.records_emitted >= limit)
    }
}

/// Parse `<seconds>` or `<seconds> <±hhmm>`, folding the offset into the value
pub fn parse_timestamp(date: &str) -> Option<i64> {
    let mut parts = date.split_whitespace();
    let seconds = parts.next()?.parse::<i64>().ok()?;

    let offset = match parts.next() {
        None => 0,
        Some(zone) => parse_zone(zone)?,
    };
    if parts.next().is_some() {
        return None;
    }

    seconds.checked_add(i64::from(offset))
}

fn parse_zone(zone: &str) -> Option<i32> {
    let (sign, digits) = match zone.split_at_checked(1)? {
        ("+", digits) => (1, digits),
        ("-", digits) => (-1, digits),
        _ => return None,
    };
    if digits.len() != 4 || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;

    Some(offset.local_minus_utc())
}
