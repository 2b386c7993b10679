use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use rstest::fixture;
use std::path::PathBuf;

#[fixture]
pub fn input_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Write `content` to a file in `dir` and return its path
pub fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let file = dir.child(name);
    file.write_str(content)
        .unwrap_or_else(|e| panic!("Failed to write {name}: {e}"));
    file.path().to_path_buf()
}

#[fixture]
pub fn log_output() -> String {
    [
        "abc1234 (HEAD -> main, origin/main) [Jane Doe][1700000000]Fix parser crash",
        "",
        "The tokenizer read past the end of input.",
        "def5678 [John Roe][1699917200]Add [WIP] tokenizer",
        "0123abc [Jane Doe][1699400000]Initial commit",
    ]
    .join("\n")
}

#[fixture]
pub fn graph_output() -> String {
    [
        "* abc1234 [Jane Doe][1700000000]Merge topic",
        "|\\",
        "| * def5678 [John Roe][1699990000]Topic work",
        "|/",
        "* 0123abc [Jane Doe][1699900000]Base",
    ]
    .join("\n")
}

#[fixture]
pub fn reflog_output() -> String {
    [
        "abc1234 HEAD@{1700000000 +0000} commit (amend): Fix typo",
        "def5678 HEAD@{1699996400 +0000} rebase -i (finish): returning to refs/heads/main",
        "0123abc ",
        "4567def HEAD@{1699990000 +0000} checkout: moving from topic to main",
    ]
    .join("\n")
}

#[fixture]
pub fn cherry_output() -> String {
    ["+ abc1234 Not upstream yet", "- def5678 Already applied"].join("\n")
}
