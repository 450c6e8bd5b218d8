//! Integration tests for the stubgen binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const COUNTER: &str = r#"{
    "name": "Counter",
    "properties": [
        { "name": "Value", "type": "int", "writable": true },
        { "name": "Item", "type": "double", "writable": true, "index": ["int"] }
    ],
    "methods": [
        { "name": "Reset" },
        {
            "name": "TryRead",
            "params": [
                { "name": "key", "type": "string" },
                { "name": "found", "type": "int", "mode": "out" }
            ],
            "returns": "bool"
        }
    ]
}"#;

fn stubgen(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stubgen"))
        .args(args)
        .arg("--color")
        .arg("never")
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run stubgen")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_emit_prints_wrapper_source() {
    let dir = TempDir::new().unwrap();
    write(&dir, "counter.json", COUNTER);

    let output = stubgen(&["emit", "counter.json"], dir.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("namespace Stubs {"));
    assert!(text.contains("class CounterWrapper"));
    assert!(text.contains("IndexedAccessor"));
    assert!(text.contains("this.source.Reset("));
}

#[test]
fn test_emit_to_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "counter.json", COUNTER);

    let output = stubgen(&["emit", "counter.json", "-o", "counter.stub"], dir.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Wrote CounterWrapper"));
    let text = std::fs::read_to_string(dir.path().join("counter.stub")).unwrap();
    assert!(text.contains("class CounterWrapper"));
}

#[test]
fn test_build_lists_members() {
    let dir = TempDir::new().unwrap();
    write(&dir, "counter.json", COUNTER);

    let output = stubgen(&["build", "counter.json"], dir.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Built artifact"));
    assert!(text.contains("Stubs.CounterWrapper wraps Counter"));
    assert!(text.contains("Value: int { get; set; }"));
    assert!(text.contains("TryRead(key: string, out found: int): bool"));
}

#[test]
fn test_config_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    write(&dir, "counter.json", COUNTER);
    write(&dir, "stubgen.toml", "namespace = \"Bindings\"\nwrapper_suffix = \"Stub\"\n");

    let output = stubgen(&["build", "counter.json"], dir.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Bindings.CounterStub wraps Counter"));
}

#[test]
fn test_check_accepts_emitted_source() {
    let dir = TempDir::new().unwrap();
    write(&dir, "counter.json", COUNTER);

    let emitted = stubgen(&["emit", "counter.json", "-o", "counter.stub"], dir.path());
    assert!(emitted.status.success(), "stderr: {}", stderr(&emitted));

    let output = stubgen(&["check", "counter.stub", "--target", "counter.json"], dir.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Stubs.CounterWrapper"));
}

#[test]
fn test_check_reports_diagnostics() {
    let dir = TempDir::new().unwrap();
    write(&dir, "counter.json", COUNTER);
    write(
        &dir,
        "broken.stub",
        "class W { constructor(source: Counter) { } public A(): int { return nope; } }",
    );

    let output = stubgen(&["check", "broken.stub", "--target", "counter.json"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("error[E0004]"), "stderr: {}", err);
    assert!(err.contains("broken.stub"));
    assert!(err.contains("could not compile artifact"));
}

#[test]
fn test_unsupported_shape_fails() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "grid.json",
        r#"{ "name": "Grid", "properties": [ { "name": "Cell", "type": "int", "index": ["int", "int"] } ] }"#,
    );

    let output = stubgen(&["build", "grid.json"], dir.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Cell"));
}

#[test]
fn test_missing_descriptor_fails() {
    let dir = TempDir::new().unwrap();
    let output = stubgen(&["emit", "nope.json"], dir.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nope.json"));
}
