use assert_cmd::Command;

/// Fixed "now" so margins are stable: one hour after the fixtures' dates
pub const NOW: &str = "1700003600";

pub fn run_logwash_command(args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("logwash").expect("Failed to find logwash binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("LOGWASH_MARGIN_WIDTH");
    cmd.env_remove("LOGWASH_UNIT_WIDTH");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}
