// src/resolve/mod.rs

//! Executable resolution.
//!
//! Turns a command name as typed by the user into the concrete program and
//! argument list the OS should run:
//!
//! - [`path_search`] walks the current directory and `PATH` for bare names
//!   ([`run_down_path`]).
//! - [`dispatch`] probes script extensions and routes scripts through their
//!   interpreter on platforms without shebang support
//!   ([`find_actual_executable`]).
//!
//! Nothing in here reads process-global state directly: the environment is
//! captured once into a [`ResolverEnv`] and filesystem access goes through
//! [`crate::fs::FileSystem`], so resolution is a pure function of its inputs.

pub mod dispatch;
pub mod path_search;

use std::path::PathBuf;

use crate::types::Platform;

pub use dispatch::find_actual_executable;
pub use path_search::run_down_path;

/// Interpreter used for `.js` scripts unless configured otherwise.
pub const DEFAULT_SCRIPT_RUNTIME: &str = "node";

/// Windows directory assumed when `SystemRoot` is not set.
pub const DEFAULT_SYSTEM_ROOT: &str = r"C:\Windows";

/// The concrete program + arguments handed to process creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableSpec {
    pub program: String,
    pub arguments: Vec<String>,
}

impl ExecutableSpec {
    pub fn new(program: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            program: program.into(),
            arguments,
        }
    }
}

/// Environment inputs consulted during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverEnv {
    pub platform: Platform,
    /// Raw value of `PATH`, if set.
    pub path: Option<String>,
    /// Raw value of `SystemRoot`, if set. Only used for interpreter dispatch.
    pub system_root: Option<String>,
    /// Program that runs `.js` scripts under interpreter dispatch.
    pub script_runtime: String,
}

impl ResolverEnv {
    /// Capture the resolver inputs from the current process.
    pub fn from_process() -> Self {
        Self {
            platform: Platform::current(),
            path: std::env::var_os("PATH").map(|p| p.to_string_lossy().into_owned()),
            system_root: std::env::var_os("SYSTEMROOT")
                .or_else(|| std::env::var_os("SystemRoot"))
                .map(|p| p.to_string_lossy().into_owned()),
            script_runtime: DEFAULT_SCRIPT_RUNTIME.to_string(),
        }
    }

    /// `PATH` entries in listed order, empty entries dropped.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let separator = self.platform.path_list_separator();
        self.path
            .as_deref()
            .unwrap_or_default()
            .split(separator)
            .filter(|entry| !entry.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    pub fn system_root(&self) -> &str {
        match self.system_root.as_deref() {
            Some(root) if !root.is_empty() => root,
            _ => DEFAULT_SYSTEM_ROOT,
        }
    }
}
