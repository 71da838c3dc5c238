// src/errors.rs

//! Crate-wide error types.
//!
//! - [`RunError`] is what the process runner settles with on failure. Its
//!   display text already carries the exit code and captured output, so the
//!   CLI can print it as-is.
//! - [`XvfbMaybeError`] wraps everything the application layer can fail
//!   with (config, usage, helper lookup, process failures).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XvfbMaybeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Usage error: {0}")]
    UsageError(String),

    #[error("Failed to find {0} in PATH. Use your distro's package manager to install it.")]
    HelperNotFound(String),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure of a single child process run.
#[derive(Error, Debug)]
pub enum RunError {
    /// The OS refused to create the process at all.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error(
        "Failed with exit code: {}\nOutput:\n{output}",
        describe_exit(.code, .signal)
    )]
    NonZeroExit {
        code: Option<i32>,
        signal: Option<i32>,
        output: String,
    },

    /// Waiting on the process handle failed after a successful spawn.
    #[error("Process execution failed: {source}\nOutput:\n{output}")]
    Execution {
        #[source]
        source: std::io::Error,
        output: String,
    },

    /// Every signal source went away before the run settled.
    #[error("process signals ended before completion\nOutput:\n{output}")]
    Incomplete { output: String },
}

impl RunError {
    /// Exit code reported by the child, when there is one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunError::NonZeroExit { code, .. } => *code,
            _ => None,
        }
    }

    /// Output captured up to the point of failure.
    pub fn output(&self) -> &str {
        match self {
            RunError::Spawn { .. } => "",
            RunError::NonZeroExit { output, .. }
            | RunError::Execution { output, .. }
            | RunError::Incomplete { output } => output.as_str(),
        }
    }
}

fn describe_exit(code: &Option<i32>, signal: &Option<i32>) -> String {
    match (code, signal) {
        (Some(code), _) => code.to_string(),
        (None, Some(signal)) => format!("none (terminated by signal {signal})"),
        (None, None) => "none".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, XvfbMaybeError>;
