//! Process runner tests against real shell commands

#![cfg(unix)]

use incmine_core::{CommandSpec, ExitStatus, ProcessRunner, RunnerError};
use rayon::prelude::*;
use std::time::{Duration, Instant};

fn runner(timeout_ms: u64) -> ProcessRunner {
    ProcessRunner::new(Duration::from_millis(timeout_ms)).unwrap()
}

fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh").arg("-c").arg(script)
}

#[test]
fn test_captures_stdout_and_stderr_separately() {
    let output = runner(5_000)
        .execute(&sh("echo out; echo err >&2"), None)
        .unwrap();

    assert!(output.success());
    assert_eq!(output.stdout, "out\n");
    assert_eq!(output.stderr, "err\n");
}

#[test]
fn test_nonzero_exit_is_a_result() {
    let output = runner(5_000).execute(&sh("exit 3"), None).unwrap();
    assert_eq!(output.status, ExitStatus::Exited(3));
    assert!(!output.success());
}

#[test]
fn test_input_fed_on_stdin() {
    let output = runner(5_000)
        .execute(&CommandSpec::new("cat"), Some("int x;\n"))
        .unwrap();
    assert_eq!(output.stdout, "int x;\n");
}

#[test]
fn test_unread_input_is_not_an_error() {
    let input = "x".repeat(1 << 20);
    let output = runner(5_000).execute(&sh("exit 0"), Some(&input)).unwrap();
    assert!(output.success());
}

#[test]
fn test_timeout_kills_process() {
    let start = Instant::now();
    let output = runner(200).execute(&CommandSpec::new("sleep").arg("10"), None).unwrap();

    assert_eq!(output.status, ExitStatus::TimedOut);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_spawn_failure() {
    let err = runner(1_000)
        .execute(&CommandSpec::new("/no/such/compiler"), None)
        .unwrap_err();
    assert!(matches!(err, RunnerError::Spawn { .. }));
}

#[test]
fn test_working_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let expected = dir.path().canonicalize().unwrap();
    let output = runner(5_000)
        .execute(&sh("pwd -P").current_dir(dir.path()), None)
        .unwrap();
    assert_eq!(output.stdout.trim(), expected.to_str().unwrap());
}

#[test]
fn test_shared_runner_from_parallel_workers() {
    let runner = runner(5_000);
    let outputs: Vec<String> = (0..16)
        .into_par_iter()
        .map(|i| {
            runner
                .execute(&sh(&format!("echo {}", i)), None)
                .unwrap()
                .stdout
        })
        .collect();

    let expected: Vec<String> = (0..16).map(|i| format!("{}\n", i)).collect();
    assert_eq!(outputs, expected);
}
