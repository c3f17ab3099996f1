//! CLI interface tests
//!
//! Drives the demo binary end-to-end: exit codes, stdout, and the usage
//! text written to stderr.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_no_subcommand_exits_one_with_usage() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Commands:"))
        .stderr(predicate::str::contains("greet"))
        .stderr(predicate::str::contains("copy"))
        .stderr(predicate::str::contains("fail"));
}

#[test]
fn test_unknown_subcommand_exits_one() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("bogus")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("greet"));
}

#[test]
fn test_greet_with_flags() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("greet")
        .arg("--name")
        .arg("crab")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello, crab!"));
}

#[test]
fn test_greet_passes_leftover_args() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("greet")
        .arg("--greeting")
        .arg("hi")
        .arg("sailor")
        .assert()
        .success()
        .stdout(predicate::str::contains("hi, world!"))
        .stdout(predicate::str::contains("hi, sailor!"));
}

#[test]
fn test_subcommand_help_shows_usage_and_skips_handler() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("greet")
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Greeting word to use"))
        .stdout(predicate::str::contains("hello").not());
}

#[test]
fn test_missing_required_flags_exit_one_with_usage() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("copy")
        .arg("--source")
        .arg("a.txt")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Required flags: source, target"));
}

#[test]
fn test_required_flags_satisfied() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("copy")
        .arg("--source")
        .arg("a.txt")
        .arg("--target")
        .arg("b.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("copying a.txt -> b.txt"));
}

#[test]
fn test_handler_failure_uses_its_exit_code() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("fail")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("FATAL: bad input"));
}

#[test]
fn test_handler_failure_with_custom_code() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("fail").arg("--code").arg("7").assert().code(7);
}

#[test]
fn test_handler_failure_can_request_usage() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("fail")
        .arg("--show-usage")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("FATAL: bad input"))
        .stderr(predicate::str::contains("configurable exit code"));
}

#[test]
fn test_global_flag_before_subcommand() {
    let mut cmd = Command::cargo_bin("subcmd-demo").unwrap();
    cmd.arg("--verbose")
        .arg("greet")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello, world!"));
}
