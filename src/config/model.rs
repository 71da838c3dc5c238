// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::resolve::DEFAULT_SCRIPT_RUNTIME;
use crate::types::StdioMode;

/// Configuration as read from TOML, before validation.
///
/// ```toml
/// [xvfb]
/// program = "xvfb-run"
/// args = ["--auto-servernum"]
///
/// [spawn]
/// cwd = "/tmp/work"
/// stdio = "inherit"
/// env = { ELECTRON_ENABLE_LOGGING = "1" }
///
/// [resolve]
/// script_runtime = "node"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub xvfb: XvfbSection,

    #[serde(default)]
    pub spawn: SpawnSection,

    #[serde(default)]
    pub resolve: ResolveSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`
/// (or `Default`, which is valid by construction).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub xvfb: XvfbSection,
    pub spawn: SpawnSection,
    pub resolve: ResolveSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        xvfb: XvfbSection,
        spawn: SpawnSection,
        resolve: ResolveSection,
    ) -> Self {
        Self {
            xvfb,
            spawn,
            resolve,
        }
    }
}

/// `[xvfb]` section: the virtual framebuffer helper.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XvfbSection {
    /// Helper looked up on `PATH` when no display is available.
    #[serde(default = "default_xvfb_program")]
    pub program: String,

    /// Helper arguments used when the invocation passes none before `--`.
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_xvfb_program() -> String {
    "xvfb-run".to_string()
}

impl Default for XvfbSection {
    fn default() -> Self {
        Self {
            program: default_xvfb_program(),
            args: Vec::new(),
        }
    }
}

/// `[spawn]` section: how the child process is started.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpawnSection {
    /// Working directory for the child. Inherited when unset.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// `"inherit"` (default) or `"capture"`.
    #[serde(default)]
    pub stdio: StdioMode,

    /// Extra variables layered over the inherited environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// `[resolve]` section: executable resolution knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveSection {
    /// Interpreter for `.js` scripts on platforms without shebang support.
    #[serde(default = "default_script_runtime")]
    pub script_runtime: String,
}

fn default_script_runtime() -> String {
    DEFAULT_SCRIPT_RUNTIME.to_string()
}

impl Default for ResolveSection {
    fn default() -> Self {
        Self {
            script_runtime: default_script_runtime(),
        }
    }
}
