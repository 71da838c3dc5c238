#![allow(dead_code)]

use std::path::PathBuf;

use xvfb_maybe::config::{ConfigFile, RawConfigFile};
use xvfb_maybe::resolve::{ResolverEnv, DEFAULT_SCRIPT_RUNTIME};
use xvfb_maybe::types::{Platform, StdioMode};

/// Builder for `ResolverEnv` so tests never depend on the host's PATH.
pub struct ResolverEnvBuilder {
    env: ResolverEnv,
}

impl ResolverEnvBuilder {
    /// POSIX-style environment with an empty PATH.
    pub fn posix() -> Self {
        Self {
            env: ResolverEnv {
                platform: Platform::DirectScripts,
                path: None,
                system_root: None,
                script_runtime: DEFAULT_SCRIPT_RUNTIME.to_string(),
            },
        }
    }

    /// Windows-style environment with `SystemRoot = C:\Windows`.
    pub fn windows() -> Self {
        Self {
            env: ResolverEnv {
                platform: Platform::InterpreterDispatch,
                path: None,
                system_root: Some(r"C:\Windows".to_string()),
                script_runtime: DEFAULT_SCRIPT_RUNTIME.to_string(),
            },
        }
    }

    /// Set PATH from entries, joined with the platform's separator.
    pub fn with_path_dirs(mut self, dirs: &[&str]) -> Self {
        let sep = self.env.platform.path_list_separator().to_string();
        self.env.path = Some(dirs.join(&sep));
        self
    }

    pub fn with_raw_path(mut self, path: &str) -> Self {
        self.env.path = Some(path.to_string());
        self
    }

    pub fn with_system_root(mut self, root: Option<&str>) -> Self {
        self.env.system_root = root.map(str::to_string);
        self
    }

    pub fn with_script_runtime(mut self, runtime: &str) -> Self {
        self.env.script_runtime = runtime.to_string();
        self
    }

    pub fn build(self) -> ResolverEnv {
        self.env
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_xvfb_program(mut self, program: &str) -> Self {
        self.config.xvfb.program = program.to_string();
        self
    }

    pub fn with_xvfb_arg(mut self, arg: &str) -> Self {
        self.config.xvfb.args.push(arg.to_string());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.config.spawn.cwd = Some(cwd.into());
        self
    }

    pub fn with_stdio(mut self, stdio: StdioMode) -> Self {
        self.config.spawn.stdio = stdio;
        self
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.config.spawn.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
