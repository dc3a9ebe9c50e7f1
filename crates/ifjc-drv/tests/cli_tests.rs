//! End-to-end tests driving the `ifjc` binary exactly as a shell user
//! would: real process, real stdin/stdout/stderr, no library calls.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn ifjc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ifjc"))
}

#[test]
fn help_flag_describes_usage() {
    let mut cmd = Command::new(ifjc_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage").or(predicate::str::contains("ifjc")));
}

#[test]
fn version_flag_reports_a_version() {
    let mut cmd = Command::new(ifjc_bin());
    cmd.arg("--version");

    cmd.assert().success();
}

#[test]
fn compiles_from_stdin_by_default() {
    let mut cmd = Command::new(ifjc_bin());
    cmd.write_stdin("require \"ifj21\"\nfunction main()\n    write(\"hi\")\nend\nmain()\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(".IFJcode21"));
}

#[test]
fn compiles_named_file_argument() {
    let input = fixtures_dir().join("hello.ifj21");

    let mut cmd = Command::new(ifjc_bin());
    cmd.arg(&input);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".IFJcode21").and(predicate::str::contains("LABEL main")));
}

#[test]
fn output_flag_redirects_generated_code_to_a_file() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let output_path = temp_dir.path().join("out.ifjcode");
    let input = fixtures_dir().join("hello.ifj21");

    let mut cmd = Command::new(ifjc_bin());
    cmd.arg(&input).arg("-o").arg(&output_path);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let contents = std::fs::read_to_string(&output_path).expect("output file should exist");
    assert!(contents.starts_with(".IFJcode21"));
}

#[test]
fn missing_prolog_exits_with_other_semantic_code() {
    let input = fixtures_dir().join("bad_prolog.ifj21");

    let mut cmd = Command::new(ifjc_bin());
    cmd.arg(&input);

    cmd.assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("prolog"));
}

#[test]
fn no_color_strips_ansi_escapes_from_diagnostics() {
    let input = fixtures_dir().join("bad_prolog.ifj21");

    let mut cmd = Command::new(ifjc_bin());
    cmd.arg(&input).arg("--no-color");

    cmd.assert().failure().stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn unreadable_input_path_is_a_driver_error_not_a_compiler_one() {
    let mut cmd = Command::new(ifjc_bin());
    cmd.arg("/nonexistent/path/does-not-exist.ifj21");

    cmd.assert().failure().code(99);
}
