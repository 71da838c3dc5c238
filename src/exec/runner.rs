// src/exec/runner.rs

//! Async shell around [`CompletionBarrier`]: spawns the child, pumps its
//! streams and exit status into one channel, and settles once.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::errors::RunError;
use crate::exec::SpawnOptions;
use crate::exec::barrier::{CompletionBarrier, ExitInfo, Settlement, Signal, StreamKind};
use crate::resolve::ExecutableSpec;
use crate::types::StdioMode;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// How long a failed run keeps collecting output for streams that are still
/// open after the exit was observed.
pub const FAILURE_DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Run `spec` to completion.
///
/// Resolves with the merged stdout/stderr text once both streams have
/// closed and the process exited with code 0. Rejects once the process exits
/// unsuccessfully (or cannot be waited on), carrying the output written
/// before the exit. Streams still held open by other processes are given
/// [`FAILURE_DRAIN_GRACE`] to close before the rejection goes out. A spawn
/// failure is returned immediately.
///
/// In [`StdioMode::Inherit`] nothing is captured and the output is empty.
pub async fn run(spec: &ExecutableSpec, options: &SpawnOptions) -> Settlement {
    info!(
        program = %spec.program,
        args = ?spec.arguments,
        "spawning process"
    );

    let mut child = build_command(spec, options)
        .spawn()
        .map_err(|source| {
            warn!(program = %spec.program, error = %source, "failed to spawn process");
            RunError::Spawn {
                program: spec.program.clone(),
                source,
            }
        })?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Signal>();

    pump_stream(StreamKind::Stdout, child.stdout.take(), tx.clone());
    pump_stream(StreamKind::Stderr, child.stderr.take(), tx.clone());
    wait_for_exit(child, tx);

    let mut barrier = CompletionBarrier::new();
    let settlement = loop {
        let Some(signal) = rx.recv().await else {
            // Every sender is gone but the barrier never decided.
            break barrier
                .abandon()
                .unwrap_or_else(|| Err(RunError::Incomplete { output: String::new() }));
        };
        trace!(?signal, pending = barrier.pending(), "process signal");

        // The exit can overtake chunks the pumps have not forwarded yet.
        if signal.is_failure() {
            drain_streams(&mut barrier, &mut rx).await;
        }

        if let Some(settlement) = barrier.on_signal(signal) {
            break settlement;
        }
    };

    log_settlement(spec, &settlement);
    settlement
}

/// Feed stream signals into `barrier` until both streams closed or
/// [`FAILURE_DRAIN_GRACE`] elapsed. Called with the failing exit signal held
/// back, so the barrier cannot settle in here.
async fn drain_streams(barrier: &mut CompletionBarrier, rx: &mut mpsc::UnboundedReceiver<Signal>) {
    let deadline = tokio::time::sleep(FAILURE_DRAIN_GRACE);
    tokio::pin!(deadline);

    // Only the held-back exit is outstanding once both streams closed.
    while barrier.pending() > 1 {
        tokio::select! {
            signal = rx.recv() => match signal {
                Some(signal) => {
                    trace!(?signal, pending = barrier.pending(), "process signal after failed exit");
                    let _ = barrier.on_signal(signal);
                }
                None => break,
            },
            _ = &mut deadline => {
                debug!(
                    pending = barrier.pending(),
                    "streams still open after failed exit; settling with partial output"
                );
                break;
            }
        }
    }
}

fn build_command(spec: &ExecutableSpec, options: &SpawnOptions) -> Command {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.arguments);

    if let Some(ref dir) = options.working_directory {
        cmd.current_dir(dir);
    }

    if let Some(ref env) = options.environment {
        cmd.env_clear().envs(env);
    }

    match options.stdio {
        StdioMode::Inherit => {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }
        StdioMode::Capture => {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }
    }

    cmd
}

/// Forward chunks from `stream` and then a `Closed` signal. A missing
/// stream is reported closed straight away.
fn pump_stream<R>(kind: StreamKind, stream: Option<R>, tx: mpsc::UnboundedSender<Signal>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(mut stream) = stream else {
        let _ = tx.send(Signal::Closed(kind));
        return;
    };

    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        loop {
            match stream.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    // The receiver is gone once the run settled; keep draining
                    // so the child never blocks on a full pipe.
                    let _ = tx.send(Signal::Output(kind, buf[..n].to_vec()));
                }
                Err(e) => {
                    debug!(stream = ?kind, error = %e, "read error; treating stream as closed");
                    break;
                }
            }
        }
        let _ = tx.send(Signal::Closed(kind));
    });
}

fn wait_for_exit(mut child: Child, tx: mpsc::UnboundedSender<Signal>) {
    tokio::spawn(async move {
        let signal = match child.wait().await {
            Ok(status) => Signal::Exited(ExitInfo::from(status)),
            Err(e) => Signal::WaitFailed(e),
        };
        let _ = tx.send(signal);
    });
}

fn log_settlement(spec: &ExecutableSpec, settlement: &Settlement) {
    match settlement {
        Ok(output) => debug!(
            program = %spec.program,
            output_len = output.len(),
            "process completed successfully"
        ),
        Err(err) => debug!(
            program = %spec.program,
            exit_code = ?err.exit_code(),
            "process failed"
        ),
    }
}
