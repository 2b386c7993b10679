use assert_fs::TempDir;
use common::command::{run_logwash_command, stdout_of};
use common::input::{cherry_output, input_dir, log_output, reflog_output, write_input};
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn records_print_one_tab_separated_line_per_commit(
    input_dir: TempDir,
    log_output: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = write_input(&input_dir, "log.txt", &log_output);

    let stdout = stdout_of(&mut run_logwash_command(&[
        "records",
        "log",
        input.to_str().ok_or("non UTF-8 path")?,
    ]));

    assert_eq!(
        stdout,
        "abc1234\tJane Doe\t1700000000\t(HEAD -> main, origin/main)\t\tFix parser crash\n\
         def5678\tJohn Roe\t1699917200\t\t\tAdd [WIP] tokenizer\n\
         0123abc\tJane Doe\t1699400000\t\t\tInitial commit\n"
    );

    Ok(())
}

#[rstest]
fn records_end_with_the_limit_sentinel(log_output: String) {
    let stdout = stdout_of(
        run_logwash_command(&["records", "log", "--limit", "2"]).write_stdin(log_output),
    );

    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("def5678\t"));
    assert_eq!(lines[2], "...\t2");
}

#[rstest]
fn zero_limit_prints_only_the_sentinel(log_output: String) {
    let stdout = stdout_of(
        run_logwash_command(&["records", "log", "--limit", "0"]).write_stdin(log_output),
    );

    assert_eq!(stdout, "...\t0\n");
}

#[rstest]
fn reflog_records_carry_their_category(reflog_output: String) {
    let stdout = stdout_of(run_logwash_command(&["records", "reflog"]).write_stdin(reflog_output));

    assert_eq!(
        stdout,
        "abc1234\t\t1700000000\t\tamend\tFix typo\n\
         def5678\t\t1699996400\t\trebase\treturning to refs/heads/main\n\
         4567def\t\t1699990000\t\tcheckout\tmoving from topic to main\n"
    );
}

#[rstest]
fn cherry_records_carry_their_marker(cherry_output: String) {
    let stdout = stdout_of(run_logwash_command(&["records", "cherry"]).write_stdin(cherry_output));

    assert_eq!(
        stdout,
        "abc1234\t\t\t\t+\tNot upstream yet\n\
         def5678\t\t\t\t-\tAlready applied\n"
    );
}

#[test]
fn mismatched_input_fails_with_its_position() {
    run_logwash_command(&["records", "cherry"])
        .write_stdin("+ abc1234 ok\ngarbage\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "expected a cherry record at line 2 (offset 13)",
        ));
}

#[rstest]
#[case(&["age", "90"], "  2 minutes\n")]
#[case(&["age", "1"], "  1 second\n")]
#[case(&["age", "--", "-3600"], "  1 hour\n")]
#[case(&["--unit-width", "abbreviated", "age", "90"], "  2m\n")]
#[case(&["age", "--unit-width", "abbreviated", "31556952"], "  1Y\n")]
fn age_formats_durations(#[case] args: &[&str], #[case] expected: &str) {
    assert_eq!(stdout_of(&mut run_logwash_command(args)), expected);
}

#[test]
fn unit_width_can_come_from_the_environment() {
    let stdout = stdout_of(
        run_logwash_command(&["age", "7200"]).env("LOGWASH_UNIT_WIDTH", "abbreviated"),
    );

    assert_eq!(stdout, "  2h\n");
}

#[test]
fn invalid_margin_width_in_the_environment_is_reported() {
    run_logwash_command(&["age", "1"])
        .env("LOGWASH_MARGIN_WIDTH", "wide")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOGWASH_MARGIN_WIDTH"));
}

#[rstest]
#[case("rebase -i (start)", "rebase\trebase -i (start)\n")]
#[case("commit (initial)", "commit\tinitial\n")]
#[case("checkout: moving from main to topic", "checkout\tcheckout\n")]
#[case("pull --rebase (finish)", "remote\tpull --rebase (finish)\n")]
#[case("revert", "other\trevert\n")]
fn classify_prints_category_and_text(#[case] subject: &str, #[case] expected: &str) {
    assert_eq!(stdout_of(&mut run_logwash_command(&["classify", subject])), expected);
}

#[test]
fn unknown_render_flags_are_rejected() {
    run_logwash_command(&["records", "log", "--flags", "ax"])
        .write_stdin("abc123 [Jane][1]Fix\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown render flag 'x'"));
}
