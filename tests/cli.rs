use std::fs;
use std::path::PathBuf;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

fn write_script(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path: PathBuf = dir.path().join(name);
    fs::write(&path, contents).expect("write script");
    path
}

fn run_script(contents: &str) -> Output {
    let dir = TempDir::new().expect("workdir");
    let script = write_script(&dir, "main.lox", contents);

    Command::cargo_bin("treelox")
        .expect("binary")
        .arg(&script)
        .output()
        .expect("run binary")
}

#[test]
fn successful_script_exits_zero_and_prints_to_stdout() {
    let output = run_script("print 1 + 2;");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "3\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn parse_error_exits_65() {
    let output = run_script("print 1");

    assert_eq!(output.status.code(), Some(65));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Expect ';' after value."));
}

#[test]
fn resolve_error_exits_65() {
    let output = run_script("return 1;");

    assert_eq!(output.status.code(), Some(65));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Can't return from top-level code.")
    );
}

#[test]
fn runtime_type_error_exits_70_with_line() {
    let output = run_script("print \"a\" + 1;");

    assert_eq!(output.status.code(), Some(70));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[line 1]"), "stderr: {}", stderr);
    assert!(
        stderr.contains("Operands must be two numbers or two strings."),
        "stderr: {}",
        stderr
    );
}

#[test]
fn undefined_variable_exits_70() {
    let output = run_script("print x;");

    assert_eq!(output.status.code(), Some(70));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Undefined variable 'x'"));
}

#[test]
fn compile_diagnostics_do_not_reach_stdout() {
    let output = run_script("var @ = 1;\nprint (;");

    assert_eq!(output.status.code(), Some(65));
    assert!(output.stdout.is_empty());

    // Both the scanner and the parser got their say.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unexpected character"), "stderr: {}", stderr);
    assert!(stderr.contains("Expect"), "stderr: {}", stderr);
}

#[test]
fn extra_arguments_exit_64() {
    let dir = TempDir::new().expect("workdir");
    let first = write_script(&dir, "a.lox", "print 1;");
    let second = write_script(&dir, "b.lox", "print 2;");

    let output = Command::cargo_bin("treelox")
        .expect("binary")
        .arg(&first)
        .arg(&second)
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn repl_executes_lines_and_survives_errors() {
    let output = Command::cargo_bin("treelox")
        .expect("binary")
        .write_stdin("print 1 + 2;\nprint nope;\nprint \"still here\";\n")
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3\n"), "stdout: {}", stdout);
    assert!(stdout.contains("still here"), "stdout: {}", stdout);
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Undefined variable 'nope'"),
        "stderr: {:?}",
        output.stderr
    );
}

#[test]
fn tokenize_subcommand_dumps_tokens() {
    let dir = TempDir::new().expect("workdir");
    let script = write_script(&dir, "main.lox", "var x = 12;");

    let output = Command::cargo_bin("treelox")
        .expect("binary")
        .arg("tokenize")
        .arg(&script)
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("VAR var null"), "stdout: {}", stdout);
    assert!(stdout.contains("IDENTIFIER x null"), "stdout: {}", stdout);
    assert!(stdout.contains("NUMBER 12 12.0"), "stdout: {}", stdout);
    assert!(stdout.contains("EOF  null"), "stdout: {}", stdout);
}

#[test]
fn parse_subcommand_dumps_the_tree() {
    let dir = TempDir::new().expect("workdir");
    let script = write_script(&dir, "main.lox", "print 1 + 2 * 3;");

    let output = Command::cargo_bin("treelox")
        .expect("binary")
        .arg("parse")
        .arg(&script)
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "(print (+ 1.0 (* 2.0 3.0)))\n"
    );
}
