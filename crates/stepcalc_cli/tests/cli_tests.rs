//! CLI contract tests: subcommands, output modes and stdin handling.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("stepcalc").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("solve"))
        .stdout(predicate::str::contains("calc"));
}

#[test]
fn test_solve_prints_steps_and_solution() {
    cli()
        .args(["solve", "2x + 5 = 15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [Problem] 2x+5=15"))
        .stdout(predicate::str::contains("=> x = 5"));
}

#[test]
fn test_no_steps_prints_only_solution() {
    cli()
        .args(["solve", "--no-steps", "20% of 50"])
        .assert()
        .success()
        .stdout("10\n");
}

#[test]
fn test_json_output_is_a_solve_result() {
    let output = cli()
        .args(["solve", "--json", "5!"])
        .output()
        .expect("Failed to run CLI");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON output");
    assert_eq!(json["solution"], "120");
    assert_eq!(json["last_answer"], "120");
    assert_eq!(json["steps"][0]["kind"], "problem");
}

#[test]
fn test_stdin_problems_are_solved_in_order() {
    cli()
        .args(["solve", "--no-steps"])
        .write_stdin("Homework\n2 + 2\nx^2 - 4 = 0\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("4\n"))
        .stdout(predicate::str::contains("Homework").not());
}

#[test]
fn test_failed_solve_still_succeeds() {
    cli()
        .args(["solve", "--no-steps", "10/0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Could not solve"));
}

#[test]
fn test_angle_flag_changes_trig() {
    cli()
        .args(["solve", "--no-steps", "--angle", "degrees", "sin(1)"])
        .assert()
        .success()
        .stdout("0.017452\n");
}

#[test]
fn test_calc_recalls_answers() {
    cli()
        .args(["calc", "--no-steps"])
        .write_stdin("6*7\nans+1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("42"))
        .stdout(predicate::str::contains("43"));
}
