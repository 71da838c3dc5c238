use std::str::FromStr;
use serde::Deserialize;

/// How the host's process-creation primitive treats scripts.
///
/// - `DirectScripts`: scripts run directly via a shebang line (POSIX).
/// - `InterpreterDispatch`: scripts must be handed to an interpreter
///   explicitly, and PATH lookups may need an extension appended (Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    DirectScripts,
    InterpreterDispatch,
}

impl Platform {
    /// Platform variant of the machine we are running on.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::InterpreterDispatch
        } else {
            Platform::DirectScripts
        }
    }

    /// Separator between entries of the `PATH` variable.
    pub fn path_list_separator(self) -> char {
        match self {
            Platform::DirectScripts => ':',
            Platform::InterpreterDispatch => ';',
        }
    }
}

/// Operating system family, as far as display handling cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    /// Linux and the other Unixes that use an X server.
    Unix,
    MacOs,
    Windows,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(windows) {
            HostOs::Windows
        } else if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else {
            HostOs::Unix
        }
    }

    /// Whether GUI programs on this OS depend on an X display at all.
    pub fn uses_x_display(self) -> bool {
        matches!(self, HostOs::Unix)
    }
}

/// What happens to the child's stdout/stderr.
///
/// - `Inherit`: the child writes straight to our own stdio; nothing is
///   captured (default for the CLI).
/// - `Capture`: both streams are piped and merged into the returned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdioMode {
    Inherit,
    Capture,
}

impl Default for StdioMode {
    fn default() -> Self {
        StdioMode::Inherit
    }
}

impl FromStr for StdioMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inherit" => Ok(StdioMode::Inherit),
            "capture" => Ok(StdioMode::Capture),
            other => Err(format!(
                "invalid stdio mode: {other} (expected \"inherit\" or \"capture\")"
            )),
        }
    }
}
