// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod launch;
pub mod logging;
pub mod resolve;
pub mod types;

use tracing::debug;

use crate::cli::{CliArgs, split_invocation};
use crate::config::{config_path_from_env, load_optional};
use crate::errors::Result;
use crate::fs::RealFileSystem;
use crate::launch::{HostInfo, locate_helper, plan_launch, spawn, spawn_options};
use crate::resolve::ResolverEnv;

/// Exit status of the `xvfb-maybe` binary for usage errors and failures.
pub const FAILURE_EXIT_CODE: i32 = 255;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - splitting the command line into helper args and the command
/// - config loading
/// - the display decision (direct vs. `xvfb-run`)
/// - executable resolution and the process runner
///
/// Returns whatever output was captured (empty when stdio is inherited).
pub async fn run(args: CliArgs) -> Result<String> {
    let invocation = split_invocation(&args.argv)?;

    let config_path = args.config.clone().or_else(config_path_from_env);
    let cfg = load_optional(config_path.as_deref())?;

    let host = HostInfo::from_process();
    let helper = if host.needs_virtual_display() {
        locate_helper(&cfg.xvfb.program).await
    } else {
        None
    };
    let plan = plan_launch(&invocation, &host, &cfg.xvfb, |_| helper)?;
    debug!(?plan, "launch plan");

    let mut env = ResolverEnv::from_process();
    env.script_runtime = cfg.resolve.script_runtime.clone();

    let inherited = std::env::vars_os().map(|(k, v)| {
        (
            k.to_string_lossy().into_owned(),
            v.to_string_lossy().into_owned(),
        )
    });
    let options = spawn_options(&cfg.spawn, inherited);

    let output = spawn(&RealFileSystem, &env, &plan.program, &plan.args, &options).await?;
    Ok(output)
}
