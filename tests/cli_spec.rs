/// Tests for the `kestrel` binary, run as a subprocess.
use std::process::{Command, Output};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn kestrel(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kestrel"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to start kestrel")
}

fn stdout_of(args: &[&str]) -> String {
    let out = kestrel(args);
    assert!(
        out.status.success(),
        "kestrel {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim_end().to_string()
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

#[test]
fn t_prints_the_result() {
    assert_eq!(stdout_of(&["t", "5", "x -> x * 2"]), "10");
}

#[test]
fn k_prints_the_receiver() {
    assert_eq!(stdout_of(&["k", "[1, 2, 3]", "pop"]), "[1, 2]");
}

#[test]
fn chain_runs_every_step() {
    assert_eq!(
        stdout_of(&["chain", "hello", "t:.toUpperCase()", "t:+ '!'"]),
        "'HELLO!'"
    );
}

#[test]
fn defines_are_visible_to_lambdas() {
    assert_eq!(stdout_of(&["-D", "suffix='!'", "t", "'a'", "x + suffix"]), "'a!'");
}

#[test]
fn compile_shows_form_and_params() {
    let out = stdout_of(&["compile", "b - a"]);
    assert!(out.contains("Implicit"));
    assert!(out.contains("(b, a)"));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn bad_lambda_exits_with_error() {
    let out = kestrel(&["compile", "x -> (x"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error:"));
}

#[test]
fn bad_chain_step_exits_with_error() {
    let out = kestrel(&["chain", "1", "x:pop"]);
    assert_eq!(out.status.code(), Some(1));
}
