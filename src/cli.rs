// src/cli.rs

//! CLI argument parsing using `clap`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::errors::{Result, XvfbMaybeError};

/// Command-line arguments for `xvfb-maybe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "xvfb-maybe",
    version,
    about = "Runs the given command under xvfb-run under Linux if DISPLAY isn't set.",
    override_usage = "xvfb-maybe [OPTIONS] [XVFB_RUN_ARGS...] -- COMMAND [ARGS...]\n       \
                      xvfb-maybe [OPTIONS] COMMAND [ARGS...]",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `XVFB_MAYBE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Path to an optional config file (TOML).
    ///
    /// If omitted, `XVFB_MAYBE_CONFIG` is consulted; without either the
    /// built-in defaults apply.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// `xvfb-run` arguments, `--`, then the command and its arguments.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub argv: Vec<String>,
}

impl CliArgs {
    /// Parse `raw` (program name first), keeping a `--` typed before the
    /// command.
    ///
    /// clap takes a `--` that precedes every positional as its own end of
    /// options marker and drops it, but here it separates the `xvfb-run`
    /// arguments from the command.
    pub fn try_parse_args<I, T>(raw: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let raw: Vec<OsString> = raw.into_iter().map(Into::into).collect();
        let mut cli = Self::try_parse_from(raw.iter())?;

        // `argv` is always the tail of the raw arguments.
        let start = raw.len().saturating_sub(cli.argv.len());
        if start >= 2 && raw[start - 1] == "--" {
            cli.argv.insert(0, "--".to_string());
        }

        Ok(cli)
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// The positional part of the command line, split into its roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Arguments meant for `xvfb-run` (everything before `--`).
    pub xvfb_args: Vec<String>,
    pub command: String,
    pub command_args: Vec<String>,
}

/// Split raw positional arguments on the first `--`.
///
/// - `a b -- cmd x y` gives xvfb args `[a, b]`, command `cmd`, args `[x, y]`.
/// - Without `--`, the first token is the command.
/// - No command at all is a usage error.
pub fn split_invocation(argv: &[String]) -> Result<Invocation> {
    let (xvfb_args, rest) = match argv.iter().position(|a| a == "--") {
        Some(pos) => (argv[..pos].to_vec(), &argv[pos + 1..]),
        None => (Vec::new(), argv),
    };

    let Some((command, command_args)) = rest.split_first() else {
        return Err(XvfbMaybeError::UsageError(
            "no command given to run".to_string(),
        ));
    };

    Ok(Invocation {
        xvfb_args,
        command: command.clone(),
        command_args: command_args.to_vec(),
    })
}

/// Parse the process arguments, exiting with clap's message on failure.
pub fn parse() -> CliArgs {
    CliArgs::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
}
