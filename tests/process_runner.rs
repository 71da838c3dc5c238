// tests/process_runner.rs
//
// These spawn real processes through `sh`, so they only run on Unix.
#![cfg(unix)]

mod common;
use crate::common::builders::ResolverEnvBuilder;
use crate::common::{args, init_tracing, with_timeout};

use std::collections::BTreeMap;
use std::error::Error;
use std::io::ErrorKind;

use xvfb_maybe::errors::RunError;
use xvfb_maybe::exec::{self, SpawnOptions};
use xvfb_maybe::fs::RealFileSystem;
use xvfb_maybe::launch::spawn;
use xvfb_maybe::resolve::ExecutableSpec;

type TestResult = Result<(), Box<dyn Error>>;

fn sh(script: &str) -> ExecutableSpec {
    ExecutableSpec::new("sh", args(&["-c", script]))
}

#[tokio::test]
async fn captures_stdout_of_successful_process() -> TestResult {
    init_tracing();

    let output = with_timeout(exec::run(&sh("printf hello"), &SpawnOptions::capture())).await?;
    assert_eq!(output, "hello");
    Ok(())
}

#[tokio::test]
async fn nonzero_exit_carries_code_and_stderr() {
    init_tracing();

    let result = with_timeout(exec::run(
        &sh("printf oops >&2; exit 1"),
        &SpawnOptions::capture(),
    ))
    .await;

    match result {
        Err(err @ RunError::NonZeroExit { .. }) => {
            assert_eq!(err.exit_code(), Some(1));
            let msg = err.to_string();
            assert!(msg.contains('1'), "message was: {msg}");
            assert!(msg.contains("oops"), "message was: {msg}");
        }
        other => panic!("expected NonZeroExit, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_exit_never_loses_output_written_before_it() {
    init_tracing();

    // On worker threads the exit waiter can overtake the stderr pump.
    for attempt in 0..100 {
        let result = with_timeout(exec::run(
            &sh("printf oops >&2; exit 1"),
            &SpawnOptions::capture(),
        ))
        .await;

        match result {
            Err(err) => {
                assert_eq!(err.exit_code(), Some(1), "attempt {attempt}");
                assert_eq!(err.output(), "oops", "attempt {attempt}");
            }
            Ok(output) => panic!("attempt {attempt}: expected failure, got {output:?}"),
        }
    }
}

#[tokio::test]
async fn exit_code_is_preserved_exactly() {
    init_tracing();

    let result = with_timeout(exec::run(&sh("exit 42"), &SpawnOptions::capture())).await;
    assert_eq!(result.err().and_then(|e| e.exit_code()), Some(42));
}

#[tokio::test]
async fn merges_stdout_and_stderr() -> TestResult {
    init_tracing();

    // Sequential writes with a pause keep arrival order deterministic.
    let output = with_timeout(exec::run(
        &sh("printf out; sleep 0.1; printf err >&2"),
        &SpawnOptions::capture(),
    ))
    .await?;
    assert_eq!(output, "outerr");
    Ok(())
}

#[tokio::test]
async fn waits_for_output_written_by_background_child() -> TestResult {
    init_tracing();

    // The shell exits at once while a background job still holds stdout open;
    // the run only completes once that pipe closes.
    let output = with_timeout(exec::run(
        &sh("(sleep 0.2; printf late) & printf early"),
        &SpawnOptions::capture(),
    ))
    .await?;
    assert_eq!(output, "earlylate");
    Ok(())
}

#[tokio::test]
async fn inherited_stdio_counts_streams_as_closed() -> TestResult {
    init_tracing();

    let output = with_timeout(exec::run(&sh("exit 0"), &SpawnOptions::inherit())).await?;
    assert_eq!(output, "");
    Ok(())
}

#[tokio::test]
async fn missing_program_fails_at_spawn() {
    init_tracing();

    let spec = ExecutableSpec::new("/definitely/not/a/real/program", vec![]);
    let result = with_timeout(exec::run(&spec, &SpawnOptions::capture())).await;

    match result {
        Err(RunError::Spawn { program, source }) => {
            assert_eq!(program, "/definitely/not/a/real/program");
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
}

#[tokio::test]
async fn working_directory_and_environment_are_passed_through() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let mut env = BTreeMap::new();
    env.insert("GREETING".to_string(), "hi".to_string());

    let options = SpawnOptions {
        working_directory: Some(dir.path().to_path_buf()),
        environment: Some(env),
        ..SpawnOptions::capture()
    };

    // Absolute path: the replaced environment has no PATH.
    let spec = ExecutableSpec::new(
        "/bin/sh",
        args(&["-c", "printf '%s:%s:' \"$GREETING\" \"${HOME:-unset}\"; pwd -P"]),
    );
    let output = with_timeout(exec::run(&spec, &options)).await?;

    let prefix = "hi:unset:";
    assert!(output.starts_with(prefix), "output was: {output}");
    let pwd = output[prefix.len()..].trim_end();
    assert_eq!(std::path::Path::new(pwd), std::fs::canonicalize(dir.path())?);
    Ok(())
}

#[tokio::test]
async fn spawn_resolves_bare_names_before_running() -> TestResult {
    init_tracing();

    let env = ResolverEnvBuilder::posix()
        .with_path_dirs(&["/nonexistent", "/bin", "/usr/bin"])
        .build();

    let output = with_timeout(spawn(
        &RealFileSystem,
        &env,
        "sh",
        &args(&["-c", "printf resolved"]),
        &SpawnOptions::capture(),
    ))
    .await?;
    assert_eq!(output, "resolved");
    Ok(())
}

#[tokio::test]
async fn failed_exit_does_not_wait_for_open_pipes() {
    init_tracing();

    // A background job keeps both pipes open far longer than the timeout.
    let result = with_timeout(exec::run(
        &sh("printf early; (sleep 10) & exit 3"),
        &SpawnOptions::capture(),
    ))
    .await;

    let err = result.expect_err("exit 3 must reject");
    assert_eq!(err.exit_code(), Some(3));
    assert_eq!(err.output(), "early");
}
