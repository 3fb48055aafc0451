//! Integration tests for replay mode (-r/--replay flag)

use std::io::Write;
use std::process::Command;

fn run_cellpad(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_cellpad"))
        // Tests must not depend on a user's ~/.config/cellpad/config.toml.
        .arg("--no-config")
        .args(args)
        .env_remove("CELLPAD_LOG")
        .output()
        .expect("Failed to execute cellpad");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn field<'a>(stdout: &'a str, name: &str) -> &'a str {
    let prefix = format!("{}: ", name);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .unwrap_or_else(|| panic!("no {} line in {:?}", name, stdout))
}

#[test]
fn test_empty_script_reports_initial_state() {
    let (stdout, _, code) = run_cellpad(&["--replay", ""]);
    assert_eq!(code, 0);
    assert_eq!(field(&stdout, "cell"), "A1");
    assert_eq!(field(&stdout, "mode"), "viewing");
    assert_eq!(field(&stdout, "status"), "current cell: A1");
}

#[test]
fn test_click_toggle_and_type() {
    let (stdout, _, code) = run_cellpad(&["-r", "cell:C3 edit_toggle 7 cell:A1"]);
    assert_eq!(code, 0);
    assert_eq!(field(&stdout, "cell"), "C3");
    assert_eq!(field(&stdout, "mode"), "editing");
    assert_eq!(field(&stdout, "status"), "editing: C3");
    assert_eq!(field(&stdout, "formula"), "7 A1");
}

#[test]
fn test_clear_and_all_clear() {
    let (stdout, _, _) = run_cellpad(&["-r", "cell:C3 edit_toggle 7 cell:A1 clear"]);
    assert_eq!(field(&stdout, "formula"), "7");
    assert_eq!(field(&stdout, "result"), "7");

    let (stdout, _, _) = run_cellpad(&["-r", "cell:C3 edit_toggle 7 cell:A1 allClear"]);
    assert_eq!(field(&stdout, "formula"), "");
    assert_eq!(field(&stdout, "mode"), "editing");
}

#[test]
fn test_arithmetic_result() {
    let (stdout, _, code) = run_cellpad(&["-r", "1 2 + 3 * ( 4 - 1 )"]);
    assert_eq!(code, 0);
    assert_eq!(field(&stdout, "formula"), "12 + 3 * ( 4 - 1 )");
    assert_eq!(field(&stdout, "result"), "21");
}

#[test]
fn test_division_by_zero() {
    let (stdout, _, _) = run_cellpad(&["-r", "1 / 0"]);
    assert_eq!(field(&stdout, "result"), "#DIV/0!");
}

#[test]
fn test_grid_output() {
    let (stdout, _, code) = run_cellpad(&[
        "--columns",
        "2",
        "--rows",
        "2",
        "--grid",
        "-r",
        "5 edit_toggle cell:B1 edit_toggle cell:A1 * 2",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("|   | A | B |"), "{}", stdout);
    assert!(stdout.contains("| 1 | 5 | 10 |"), "{}", stdout);
}

#[test]
fn test_rejected_reference_is_logged_not_fatal() {
    let (stdout, stderr, code) = run_cellpad(&["-r", "edit_toggle cell:A1 4"]);
    assert_eq!(code, 0);
    assert_eq!(field(&stdout, "formula"), "4");
    assert!(stderr.contains("WARN"), "{}", stderr);
}

#[test]
fn test_grid_requires_replay() {
    let (_, stderr, code) = run_cellpad(&["--grid"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("--replay"), "{}", stderr);
}

#[test]
fn test_out_of_range_size_is_clamped_with_warning() {
    let (stdout, stderr, code) = run_cellpad(&["--columns", "40", "-r", "cell:Z1"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Warning: Sheet columns 40 out of range"), "{}", stderr);
    assert_eq!(field(&stdout, "cell"), "Z1");
}

#[test]
fn test_config_file_sets_sheet_size() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    file.write_all(b"[sheet]\ncolumns = 2\nrows = 2\n")
        .expect("write temp config");
    let path = file.path().to_str().expect("utf-8 path");

    let output = Command::new(env!("CARGO_BIN_EXE_cellpad"))
        .args(["--config", path, "--grid", "-r", ""])
        .output()
        .expect("Failed to execute cellpad");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("|   | A | B |\n"), "{}", stdout);
    assert!(!stdout.contains("| 3 |"), "{}", stdout);
}
