// src/exec/barrier.rs

//! Pure completion state machine for a single child process.
//!
//! A run is only finished once three independent signals have arrived:
//! stdout closed, stderr closed, and the process exited. They can show up in
//! any order. A failed exit short-circuits the wait and settles the run
//! immediately.
//!
//! This type does no IO; [`super::runner`] feeds it from Tokio tasks.

use std::process::ExitStatus;

use crate::errors::RunError;

/// Number of signals a successful run waits for.
pub const SIGNAL_COUNT: u8 = 3;

/// Which of the two output streams a signal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// How the process ended, reduced to what the barrier needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitInfo {
    pub code: Option<i32>,
    pub signal: Option<i32>,
}

impl ExitInfo {
    pub fn code(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ExitInfo {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

/// Everything that can happen to a running child.
#[derive(Debug)]
pub enum Signal {
    /// A chunk of bytes arrived on one of the streams.
    Output(StreamKind, Vec<u8>),
    /// A stream reached EOF, or was never attached.
    Closed(StreamKind),
    /// The process exited.
    Exited(ExitInfo),
    /// Waiting on the process handle failed.
    WaitFailed(std::io::Error),
}

impl Signal {
    /// True for the signals that reject the run.
    pub fn is_failure(&self) -> bool {
        match self {
            Signal::Exited(exit) => !exit.success(),
            Signal::WaitFailed(_) => true,
            Signal::Output(..) | Signal::Closed(_) => false,
        }
    }
}

/// Final result of a run, produced exactly once.
pub type Settlement = Result<String, RunError>;

/// Counts outstanding signals and collects merged output.
#[derive(Debug)]
pub struct CompletionBarrier {
    pending: u8,
    settled: bool,
    output: Vec<u8>,
}

impl Default for CompletionBarrier {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self {
            pending: SIGNAL_COUNT,
            settled: false,
            output: Vec::new(),
        }
    }

    /// Signals still outstanding.
    pub fn pending(&self) -> u8 {
        self.pending
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Output gathered so far, decoded lossily.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Feed one signal. Returns the settlement the first (and only) time the
    /// run becomes decided; every later call returns `None`.
    pub fn on_signal(&mut self, signal: Signal) -> Option<Settlement> {
        match signal {
            Signal::Output(_, chunk) => {
                if !self.settled {
                    self.output.extend_from_slice(&chunk);
                }
                None
            }
            Signal::Closed(_) => self.release(),
            Signal::Exited(exit) if exit.success() => self.release(),
            Signal::Exited(exit) => {
                self.pending = self.pending.saturating_sub(1);
                self.reject(|output| RunError::NonZeroExit {
                    code: exit.code,
                    signal: exit.signal,
                    output,
                })
            }
            Signal::WaitFailed(source) => {
                self.pending = self.pending.saturating_sub(1);
                self.reject(|output| RunError::Execution { source, output })
            }
        }
    }

    /// Settle with whatever was collected when the signal sources vanish
    /// without deciding the run.
    pub fn abandon(&mut self) -> Option<Settlement> {
        self.reject(|output| RunError::Incomplete { output })
    }

    fn release(&mut self) -> Option<Settlement> {
        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 && !self.settled {
            self.settled = true;
            return Some(Ok(self.output()));
        }
        None
    }

    fn reject(&mut self, make: impl FnOnce(String) -> RunError) -> Option<Settlement> {
        if self.settled {
            return None;
        }
        self.settled = true;
        Some(Err(make(self.output())))
    }
}
