// src/resolve/path_search.rs

//! `PATH` walking for bare command names.
//!
//! Process creation does not search `PATH` the same way everywhere (Windows
//! in particular), so bare names are resolved here before spawning.

use std::path::Path;

use tracing::{debug, trace};

use crate::fs::FileSystem;
use crate::resolve::ResolverEnv;

/// Whether `name` already points at a location rather than being a bare name.
///
/// Both separators count on every platform.
pub fn has_dir_separator(name: &str) -> bool {
    name.contains(['/', '\\'])
}

/// Resolve a bare command name to a concrete path.
///
/// - Names with a directory separator are returned unchanged.
/// - Otherwise `./name` is tried first, then each `PATH` entry in order.
///   The first candidate that is a regular file wins.
/// - If nothing matches, `name` is returned unchanged and process creation
///   reports the failure itself.
pub fn run_down_path(fs: &dyn FileSystem, env: &ResolverEnv, name: &str) -> String {
    if has_dir_separator(name) {
        return name.to_string();
    }

    let local = Path::new(".").join(name);
    if fs.is_file(&local) {
        debug!(command = name, resolved = %local.display(), "found command in current directory");
        return local.to_string_lossy().into_owned();
    }

    for dir in env.search_dirs() {
        let candidate = dir.join(name);
        trace!(candidate = %candidate.display(), "probing PATH entry");
        if fs.is_file(&candidate) {
            debug!(command = name, resolved = %candidate.display(), "found command on PATH");
            return candidate.to_string_lossy().into_owned();
        }
    }

    debug!(command = name, "command not found locally or on PATH; leaving it to the OS");
    name.to_string()
}
