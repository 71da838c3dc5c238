// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`barrier`] is the pure completion state machine deciding when a child
//!   is finished.
//! - [`runner`] spawns the child with `tokio::process::Command` and feeds
//!   its stream and exit events into the barrier.

pub mod barrier;
pub mod runner;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::types::StdioMode;

pub use barrier::{CompletionBarrier, ExitInfo, Signal, StreamKind};
pub use runner::{FAILURE_DRAIN_GRACE, run};

/// Options passed through to process creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnOptions {
    /// Working directory for the child; inherited when `None`.
    pub working_directory: Option<PathBuf>,
    /// Complete environment for the child; inherited when `None`.
    pub environment: Option<BTreeMap<String, String>>,
    pub stdio: StdioMode,
}

impl SpawnOptions {
    pub fn capture() -> Self {
        Self {
            stdio: StdioMode::Capture,
            ..Self::default()
        }
    }

    pub fn inherit() -> Self {
        Self::default()
    }
}
