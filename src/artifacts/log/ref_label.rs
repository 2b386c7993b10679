//! Ref decorations such as `(HEAD -> main, origin/main, tag: v1.0)`

use colored::{ColoredString, Colorize};
use derive_new::new;

const REMOTES_PREFIX: &str = "refs/remotes/";
const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Head,
    CurrentBranch,
    LocalBranch,
    RemoteBranch,
    RemoteHead,
    Tag,
}

impl RefKind {
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            RefKind::Head => text.cyan().bold(),
            RefKind::CurrentBranch => text.green().bold(),
            RefKind::LocalBranch => text.green(),
            RefKind::RemoteBranch => text.red(),
            RefKind::RemoteHead => text.red().bold(),
            RefKind::Tag => text.yellow().bold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RefLabel {
    pub kind: RefKind,
    pub name: String,
}

/// Split a parenthesized decoration into labels
///
/// `HEAD -> branch` yields a `Head` label followed by the `CurrentBranch`.
/// A name is remote when it lives under `refs/remotes/` or starts with one
/// of `remotes` followed by a slash; `<remote>/HEAD` is a `RemoteHead`.
pub fn parse_ref_labels(refs: &str, remotes: &[String]) -> Vec<RefLabel> {
    let inner = refs.trim();
    let inner = inner
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(inner);

    inner
        .split(", ")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .flat_map(|name| parse_one(name, remotes))
        .collect()
}

fn parse_one(name: &str, remotes: &[String]) -> Vec<RefLabel> {
    if let Some(tag) = name.strip_prefix("tag: ") {
        let tag = tag.strip_prefix(TAGS_PREFIX).unwrap_or(tag);
        return vec![RefLabel::new(RefKind::Tag, tag.to_string())];
    }
    if let Some((head, branch)) = name.split_once(" -> ") {
        let branch = branch.strip_prefix(HEADS_PREFIX).unwrap_or(branch);
        return vec![
            RefLabel::new(RefKind::Head, head.to_string()),
            RefLabel::new(RefKind::CurrentBranch, branch.to_string()),
        ];
    }
    if name == "HEAD" {
        return vec![RefLabel::new(RefKind::Head, name.to_string())];
    }

    let (remote_name, is_remote) = match name.strip_prefix(REMOTES_PREFIX) {
        Some(stripped) => (stripped, true),
        None => (name, is_remote_name(name, remotes)),
    };
    if is_remote {
        let kind = if remote_name.ends_with("/HEAD") {
            RefKind::RemoteHead
        } else {
            RefKind::RemoteBranch
        };
        return vec![RefLabel::new(kind, remote_name.to_string())];
    }

    let branch = name.strip_prefix(HEADS_PREFIX).unwrap_or(name);
    vec![RefLabel::new(RefKind::LocalBranch, branch.to_string())]
}

fn is_remote_name(name: &str, remotes: &[String]) -> bool {
    remotes.iter().any(|remote| {
        name.strip_prefix(remote.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    })
}
