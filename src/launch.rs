// src/launch.rs

//! Deciding how to launch the user's command, and launching it.
//!
//! Without an X display on Linux the command is wrapped in `xvfb-run`;
//! everywhere else it runs directly. Either way the program to start goes
//! through executable resolution before it is spawned.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::cli::Invocation;
use crate::config::{SpawnSection, XvfbSection};
use crate::errors::{Result, XvfbMaybeError};
use crate::exec::{self, SpawnOptions};
use crate::exec::barrier::Settlement;
use crate::fs::FileSystem;
use crate::resolve::{ResolverEnv, find_actual_executable, run_down_path};
use crate::types::HostOs;

/// Facts about the host that decide whether a virtual display is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub os: HostOs,
    /// Value of `DISPLAY`, if set.
    pub display: Option<String>,
}

impl HostInfo {
    pub fn from_process() -> Self {
        Self {
            os: HostOs::current(),
            display: std::env::var_os("DISPLAY").map(|d| d.to_string_lossy().into_owned()),
        }
    }

    /// True when GUI programs would have no display to talk to.
    pub fn needs_virtual_display(&self) -> bool {
        if !self.os.uses_x_display() {
            return false;
        }
        !matches!(self.display.as_deref(), Some(d) if !d.is_empty())
    }
}

/// The program + arguments to hand to [`spawn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    /// Whether the command is wrapped in the virtual framebuffer helper.
    pub wrapped: bool,
}

/// Work out what to launch for `invocation`.
///
/// `locate_helper` finds the helper binary on `PATH`; it is a parameter so
/// the decision can be tested without one installed.
pub fn plan_launch<F>(
    invocation: &Invocation,
    host: &HostInfo,
    xvfb: &XvfbSection,
    locate_helper: F,
) -> Result<LaunchPlan>
where
    F: FnOnce(&str) -> Option<PathBuf>,
{
    if !host.os.uses_x_display() {
        debug!(os = ?host.os, "platform has no X display to provide; running directly");
        return Ok(direct(invocation));
    }

    if !host.needs_virtual_display() {
        debug!(display = ?host.display, "DISPLAY is set, using local X server");
        return Ok(direct(invocation));
    }

    let helper = locate_helper(&xvfb.program)
        .ok_or_else(|| XvfbMaybeError::HelperNotFound(xvfb.program.clone()))?;

    let helper_args = if invocation.xvfb_args.is_empty() {
        xvfb.args.clone()
    } else {
        invocation.xvfb_args.clone()
    };

    let mut args = helper_args;
    args.push(invocation.command.clone());
    args.extend(invocation.command_args.iter().cloned());

    info!(helper = %helper.display(), "no DISPLAY set; wrapping command in virtual framebuffer");
    Ok(LaunchPlan {
        program: helper.to_string_lossy().into_owned(),
        args,
        wrapped: true,
    })
}

fn direct(invocation: &Invocation) -> LaunchPlan {
    LaunchPlan {
        program: invocation.command.clone(),
        args: invocation.command_args.clone(),
        wrapped: false,
    }
}

/// Find `name` on `PATH` with the `which` crate, off the async workers.
pub async fn locate_helper(name: &str) -> Option<PathBuf> {
    let name = name.to_string();
    tokio::task::spawn_blocking(move || which::which(name))
        .await
        .ok()
        .and_then(|result| result.ok())
}

/// Build spawn options from the `[spawn]` config section.
///
/// Extra variables are layered over `inherited`; with none configured the
/// child simply inherits the environment.
pub fn spawn_options<I>(spawn: &SpawnSection, inherited: I) -> SpawnOptions
where
    I: IntoIterator<Item = (String, String)>,
{
    let environment = if spawn.env.is_empty() {
        None
    } else {
        let mut env: BTreeMap<String, String> = inherited.into_iter().collect();
        env.extend(spawn.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        Some(env)
    };

    SpawnOptions {
        working_directory: spawn.cwd.clone(),
        environment,
        stdio: spawn.stdio,
    }
}

/// Resolve `command` and run it to completion.
pub async fn spawn(
    fs: &dyn FileSystem,
    env: &ResolverEnv,
    command: &str,
    args: &[String],
    options: &SpawnOptions,
) -> Settlement {
    let full_path = run_down_path(fs, env, command);
    let spec = find_actual_executable(fs, env, &full_path, args);
    debug!(
        command,
        program = %spec.program,
        args = %spec.arguments.join(" "),
        "resolved command"
    );
    exec::run(&spec, options).await
}
