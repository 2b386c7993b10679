//! Reflog subject classification
//!
//! A reflog subject such as `rebase -i (start)` or `commit (amend)` is split
//! into a command, its option tokens and a trailing parenthesized type.
//! The display label (the type for `commit`, the command otherwise) selects
//! a category from [`REFLOG_LABELS`].
//!
//! Classification is total: anything that does not parse or is not in the
//! table falls into [`ReflogCategory::Other`].

use colored::{ColoredString, Colorize};

/// Column width the rendered subject is padded to
pub const REFLOG_SUBJECT_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflogCategory {
    Commit,
    Amend,
    Merge,
    Checkout,
    Reset,
    Rebase,
    CherryPick,
    Remote,
    Other,
}

pub const REFLOG_LABELS: phf::Map<&'static str, ReflogCategory> = phf::phf_map! {
    "commit" => ReflogCategory::Commit,
    "amend" => ReflogCategory::Amend,
    "merge" => ReflogCategory::Merge,
    "checkout" => ReflogCategory::Checkout,
    "branch" => ReflogCategory::Checkout,
    "reset" => ReflogCategory::Reset,
    "rebase" => ReflogCategory::Rebase,
    "rewritten" => ReflogCategory::Rebase,
    "cherry-pick" => ReflogCategory::CherryPick,
    "initial" => ReflogCategory::Commit,
    "pull" => ReflogCategory::Remote,
    "clone" => ReflogCategory::Remote,
    "autosave" => ReflogCategory::Commit,
    "restart" => ReflogCategory::Reset,
};

impl ReflogCategory {
    pub fn for_label(label: &str) -> Self {
        REFLOG_LABELS
            .get(label)
            .copied()
            .unwrap_or(ReflogCategory::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReflogCategory::Commit => "commit",
            ReflogCategory::Amend => "amend",
            ReflogCategory::Merge => "merge",
            ReflogCategory::Checkout => "checkout",
            ReflogCategory::Reset => "reset",
            ReflogCategory::Rebase => "rebase",
            ReflogCategory::CherryPick => "cherry-pick",
            ReflogCategory::Remote => "remote",
            ReflogCategory::Other => "other",
        }
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            ReflogCategory::Commit => text.green(),
            ReflogCategory::Amend => text.magenta(),
            ReflogCategory::Merge => text.green().bold(),
            ReflogCategory::Checkout => text.blue(),
            ReflogCategory::Reset => text.red(),
            ReflogCategory::Rebase => text.magenta().bold(),
            ReflogCategory::CherryPick => text.green(),
            ReflogCategory::Remote => text.cyan(),
            ReflogCategory::Other => text.normal(),
        }
    }
}

impl std::fmt::Display for ReflogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflogSubject {
    command: String,
    options: Vec<String>,
    kind: Option<String>,
    category: ReflogCategory,
}

impl ReflogSubject {
    /// Parse `command [-option ...] [(type)]`
    ///
    /// A single trailing colon on the command is dropped, so `checkout:`
    /// classifies like `checkout`. Only the first parenthesized group right
    /// after the options is taken as the type; anything after it is ignored.
    pub fn classify(raw: &str) -> Self {
        let (command, mut rest) = split_token(raw.trim_start());
        let command = command.strip_suffix(':').unwrap_or(command).to_string();

        let mut options = Vec::new();
        loop {
            rest = rest.trim_start();
            if !rest.starts_with('-') {
                break;
            }
            let (option, remainder) = split_token(rest);
            options.push(option.to_string());
            rest = remainder;
        }

        let kind = rest
            .strip_prefix('(')
            .and_then(|inner| inner.split_once(')'))
            .map(|(kind, _)| kind.trim())
            .filter(|kind| !kind.is_empty())
            .map(str::to_string);

        let mut subject = ReflogSubject {
            command,
            options,
            kind,
            category: ReflogCategory::Other,
        };
        subject.category = ReflogCategory::for_label(subject.label());
        subject
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn category(&self) -> ReflogCategory {
        self.category
    }

    fn is_commit(&self) -> bool {
        self.command == "commit"
    }

    /// The word the category was looked up by
    pub fn label(&self) -> &str {
        if self.is_commit() {
            self.kind().unwrap_or(self.command.as_str())
        } else {
            &self.command
        }
    }

    pub fn text(&self) -> String {
        if self.is_commit() {
            return self.label().to_string();
        }

        let mut parts = vec![self.command.clone()];
        parts.extend(self.options.iter().cloned());
        if let Some(kind) = &self.kind {
            parts.push(format!("({kind})"));
        }
        parts.retain(|part| !part.is_empty());
        parts.join(" ")
    }

    /// Text padded to [`REFLOG_SUBJECT_WIDTH`], followed by a separating space
    pub fn padded(&self) -> String {
        format!("{:<width$} ", self.text(), width = REFLOG_SUBJECT_WIDTH)
    }
}

/// Classify a raw reflog subject
pub fn classify(raw_subject: &str) -> ReflogSubject {
    ReflogSubject::classify(raw_subject)
}

fn split_token(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], &text[end..]),
        None => (text, ""),
    }
}
