// ABOUTME: End-to-end tests running scripts through the compiled binary

use std::io::Write;
use std::process::Command;

fn run_script(source: &str) -> String {
    let mut file = tempfile::NamedTempFile::with_suffix(".ax").unwrap();
    write!(file, "{}", source).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_axion"))
        .arg("run")
        .arg(file.path())
        .output()
        .expect("failed to run axion binary");

    assert!(
        output.status.success(),
        "script failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn scenario_arithmetic_and_logln() {
    assert_eq!(run_script("set x = 2; logln(x * 3 + 1);"), "7\n");
}

#[test]
fn scenario_const_reassignment_errors() {
    let mut file = tempfile::NamedTempFile::with_suffix(".ax").unwrap();
    write!(file, "const pi = 3; pi = 4;").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_axion"))
        .arg("run")
        .arg(file.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Error:"));
}

#[test]
fn scenario_recursive_fibonacci() {
    let source = "func fib(n) { if (n < 2) then { return n; } return fib(n-1) + fib(n-2); } logln(fib(10));";
    assert_eq!(run_script(source), "55\n");
}

#[test]
fn scenario_array_auto_extend_display() {
    let source = "set a = [1,2,3]; a[5] = 9; logln(a);";
    assert_eq!(run_script(source), "[1, 2, 3, null, null, 9]\n");
}

#[test]
fn scenario_string_interpolation() {
    let source = r#"set name = "Ada"; logln("hi {name}!");"#;
    assert_eq!(run_script(source), "hi Ada!\n");
}

#[test]
fn scenario_loop_accumulates_log_output() {
    let source = r#"loop (i from 1 to 3 step 1) { log(i); } logln("");"#;
    assert_eq!(run_script(source), "123\n");
}

#[test]
fn missing_script_file_reports_without_crashing() {
    let output = Command::new(env!("CARGO_BIN_EXE_axion"))
        .arg("run")
        .arg("/nonexistent/path/to/script.ax")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("File not found"));
}

#[test]
fn include_loads_local_module_once() {
    let dir = tempfile::tempdir().unwrap();
    let module_path = dir.path().join("util.ax");
    std::fs::write(&module_path, "func double(n) { return n * 2; }").unwrap();

    let source = format!(
        r#"include "{}"; include "{}"; logln(util.double(21));"#,
        module_path.display(),
        module_path.display()
    );
    assert_eq!(run_script(&source), "42\n");
}
