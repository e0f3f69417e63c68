//! Integration tests for prompt round-trips against stub runner binaries.

#![cfg(unix)]

mod common;

use std::time::Duration;

use ollamachat::runner::{Runner, RunnerError};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[tokio::test]
async fn test_round_trip_returns_stdout() {
    let dir = tempdir().unwrap();
    let bin = common::stub_bin(dir.path(), "ollama", "cat >/dev/null\necho 'Hi there!'");

    let runner = Runner::new(bin.to_string_lossy());
    let output = runner.generate("llama3:latest", "Hello").await.unwrap();

    assert_eq!(output.trim(), "Hi there!");
}

#[tokio::test]
async fn test_prompt_is_written_to_stdin() {
    let dir = tempdir().unwrap();
    // Echoes stdin back, so the response mirrors the prompt
    let bin = common::stub_bin(dir.path(), "ollama", "cat");

    let runner = Runner::new(bin.to_string_lossy());
    let output = runner
        .generate("llama3:latest", "What is the capital of France?")
        .await
        .unwrap();

    assert_eq!(output, "What is the capital of France?");
}

#[tokio::test]
async fn test_model_identifier_is_passed_as_argument() {
    let dir = tempdir().unwrap();
    // Stub receives "run <model>" and prints the model back
    let bin = common::stub_bin(dir.path(), "ollama", "cat >/dev/null\necho \"$2\"");

    let runner = Runner::new(bin.to_string_lossy());
    let output = runner.generate("mistral:7b", "Hello").await.unwrap();

    assert_eq!(output.trim(), "mistral:7b");
}

#[tokio::test]
async fn test_empty_output_is_returned_as_is() {
    let dir = tempdir().unwrap();
    let bin = common::stub_bin(dir.path(), "ollama", "cat >/dev/null");

    let runner = Runner::new(bin.to_string_lossy());
    let output = runner.generate("llama3:latest", "Hello").await.unwrap();

    assert_eq!(output, "");
}

#[tokio::test]
async fn test_nonzero_exit_carries_stderr() {
    let dir = tempdir().unwrap();
    let bin = common::stub_bin(
        dir.path(),
        "ollama",
        "cat >/dev/null\necho 'model not found' >&2\nexit 3",
    );

    let runner = Runner::new(bin.to_string_lossy());
    let err = runner.generate("nope:latest", "Hello").await.unwrap_err();

    match err {
        RunnerError::Exit { code, stderr, .. } => {
            assert_eq!(code, 3);
            assert!(stderr.contains("model not found"));
        }
        other => panic!("expected Exit error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_kills_slow_runner() {
    let dir = tempdir().unwrap();
    let bin = common::stub_bin(dir.path(), "ollama", "cat >/dev/null\nsleep 10");

    let runner = Runner::new(bin.to_string_lossy())
        .with_timeout(Some(Duration::from_millis(200)));

    let started = std::time::Instant::now();
    let err = runner.generate("llama3:latest", "Hello").await.unwrap_err();

    assert!(matches!(err, RunnerError::Timeout { .. }));
    // The child must be killed rather than waited on for its full sleep
    assert!(started.elapsed() < Duration::from_secs(5));
}
