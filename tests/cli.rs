//! Integration tests driving the flatcalc binary end to end

use std::fs;
use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;

fn run_sheet(input: &str) -> (Option<String>, String, i32) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input_path = dir.path().join("input.txt");
    let output_path = dir.path().join("output.txt");
    fs::write(&input_path, input).expect("Failed to write input");

    let output = Command::new(env!("CARGO_BIN_EXE_flatcalc"))
        .arg(&input_path)
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");

    let written = read_if_exists(&output_path);
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (written, stderr, exit_code)
}

fn read_if_exists(path: &Path) -> Option<String> {
    path.exists()
        .then(|| fs::read_to_string(path).expect("Failed to read output"))
}

#[test]
fn test_expression_sheet() {
    let (out, _, code) = run_sheet("5,3\nA1 B1 +,10\n");
    assert_eq!(out.as_deref(), Some("5,3,\n8,10,"));
    assert_eq!(code, 0);
}

#[test]
fn test_reference_sheet() {
    let (out, _, code) = run_sheet("B1,5");
    assert_eq!(out.as_deref(), Some("5,5,"));
    assert_eq!(code, 0);
}

#[test]
fn test_chain_sheet() {
    let (out, _, code) = run_sheet("B1,C1,D1,5\nA1 2 /,A2 A2 *,");
    assert_eq!(out.as_deref(), Some("5,5,5,5,\n2.5,6.25,0,"));
    assert_eq!(code, 0);
}

#[test]
fn test_cycle_fails_without_output() {
    let (out, stderr, code) = run_sheet("B1,A1");
    assert_eq!(out, None);
    assert!(stderr.contains("Circular dependency"), "stderr: {stderr}");
    assert!(stderr.contains("A1, B1"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_invalid_reference_fails() {
    let (out, stderr, code) = run_sheet("1,Z9");
    assert_eq!(out, None);
    assert!(stderr.contains("Z9"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_malformed_cell_fails() {
    let (out, stderr, code) = run_sheet("1 2");
    assert_eq!(out, None);
    assert!(stderr.contains("Malformed cell A1"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_column_overflow_fails() {
    let row = vec!["1"; 27].join(",");
    let (out, stderr, code) = run_sheet(&row);
    assert_eq!(out, None);
    assert!(stderr.contains("27 columns"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_division_by_zero_fails() {
    let (out, stderr, code) = run_sheet("4 0 /");
    assert_eq!(out, None);
    assert!(stderr.contains("Division by zero"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = Command::new(env!("CARGO_BIN_EXE_flatcalc"))
        .arg(dir.path().join("nope.txt"))
        .arg(dir.path().join("out.txt"))
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "stderr: {stderr}");
    assert_eq!(output.status.code(), Some(1));
}
