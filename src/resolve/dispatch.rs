// src/resolve/dispatch.rs

//! Mapping a resolved path to the program the OS must actually start.
//!
//! On platforms with shebang support the path is already runnable. On
//! Windows, scripts referenced without their suffix need it appended, and
//! `.ps1` / `.bat` / `.cmd` / `.js` files need an interpreter in front.

use std::path::Path;

use tracing::debug;

use crate::fs::FileSystem;
use crate::resolve::{ExecutableSpec, ResolverEnv};
use crate::types::Platform;

/// Suffixes probed, in priority order, for paths without a known extension.
pub const PROBED_EXTENSIONS: [&str; 4] = [".exe", ".bat", ".cmd", ".ps1"];

/// Extensions that mark a path as already suffixed; no probing happens.
const KNOWN_EXTENSIONS: [&str; 6] = [".exe", ".bat", ".cmd", ".ps1", ".js", ".com"];

const POWERSHELL_FLAGS: [&str; 5] = [
    "-ExecutionPolicy",
    "Unrestricted",
    "-NoLogo",
    "-NonInteractive",
    "-File",
];

/// Interpreter family a script is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptKind {
    PowerShell,
    Batch,
    JavaScript,
}

impl ScriptKind {
    fn of(path: &str) -> Option<Self> {
        if has_suffix(path, ".ps1") {
            Some(ScriptKind::PowerShell)
        } else if has_suffix(path, ".bat") || has_suffix(path, ".cmd") {
            Some(ScriptKind::Batch)
        } else if has_suffix(path, ".js") {
            Some(ScriptKind::JavaScript)
        } else {
            None
        }
    }
}

/// Produce the concrete program and arguments for `path`.
///
/// For [`Platform::DirectScripts`] this is the identity. For
/// [`Platform::InterpreterDispatch`]:
///
/// 1. If `path` has no known extension, the first of `.exe`, `.bat`, `.cmd`,
///    `.ps1` that exists as `path + ext` is appended.
/// 2. `.ps1` goes through PowerShell, `.bat`/`.cmd` through `cmd.exe /C`,
///    `.js` through the configured script runtime; the script path comes
///    first, followed by `args`.
/// 3. Anything else is returned unchanged.
pub fn find_actual_executable(
    fs: &dyn FileSystem,
    env: &ResolverEnv,
    path: &str,
    args: &[String],
) -> ExecutableSpec {
    match env.platform {
        Platform::DirectScripts => ExecutableSpec::new(path, args.to_vec()),
        Platform::InterpreterDispatch => dispatch_through_interpreter(fs, env, path, args),
    }
}

fn dispatch_through_interpreter(
    fs: &dyn FileSystem,
    env: &ResolverEnv,
    path: &str,
    args: &[String],
) -> ExecutableSpec {
    let path = probe_extension(fs, path);

    let (program, mut arguments) = match ScriptKind::of(&path) {
        Some(ScriptKind::PowerShell) => {
            let program = windows_join(
                env.system_root(),
                &["System32", "WindowsPowerShell", "v1.0", "PowerShell.exe"],
            );
            let mut flags: Vec<String> = POWERSHELL_FLAGS.iter().map(|f| f.to_string()).collect();
            flags.push(path);
            (program, flags)
        }
        Some(ScriptKind::Batch) => {
            let program = windows_join(env.system_root(), &["System32", "cmd.exe"]);
            (program, vec!["/C".to_string(), path])
        }
        Some(ScriptKind::JavaScript) => (env.script_runtime.clone(), vec![path]),
        None => (path, Vec::new()),
    };

    arguments.extend_from_slice(args);
    debug!(%program, ?arguments, "dispatching through interpreter");
    ExecutableSpec::new(program, arguments)
}

/// Append the first existing probed suffix, if `path` does not carry one.
fn probe_extension(fs: &dyn FileSystem, path: &str) -> String {
    if KNOWN_EXTENSIONS.iter().any(|ext| has_suffix(path, ext)) {
        return path.to_string();
    }

    for ext in PROBED_EXTENSIONS {
        let candidate = format!("{path}{ext}");
        if fs.is_file(Path::new(&candidate)) {
            debug!(path, %candidate, "found suffixed executable");
            return candidate;
        }
    }

    path.to_string()
}

fn has_suffix(path: &str, ext: &str) -> bool {
    path.len() >= ext.len()
        && path
            .get(path.len() - ext.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(ext))
}

/// Join Windows path segments with `\`, independent of the host we run on.
fn windows_join(root: &str, segments: &[&str]) -> String {
    let mut joined = root.trim_end_matches(['\\', '/']).to_string();
    for segment in segments {
        joined.push('\\');
        joined.push_str(segment);
    }
    joined
}
