// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, XvfbMaybeError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = XvfbMaybeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.xvfb, raw.spawn, raw.resolve))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_xvfb(cfg)?;
    validate_spawn_env(cfg)?;
    validate_resolve(cfg)?;
    Ok(())
}

fn validate_xvfb(cfg: &RawConfigFile) -> Result<()> {
    if cfg.xvfb.program.trim().is_empty() {
        return Err(XvfbMaybeError::ConfigError(
            "[xvfb].program must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_spawn_env(cfg: &RawConfigFile) -> Result<()> {
    for key in cfg.spawn.env.keys() {
        if key.is_empty() {
            return Err(XvfbMaybeError::ConfigError(
                "[spawn].env contains an empty variable name".to_string(),
            ));
        }
        if key.contains('=') || key.contains('\0') {
            return Err(XvfbMaybeError::ConfigError(format!(
                "[spawn].env variable name '{}' must not contain '=' or NUL",
                key.escape_default()
            )));
        }
    }
    for (key, value) in cfg.spawn.env.iter() {
        if value.contains('\0') {
            return Err(XvfbMaybeError::ConfigError(format!(
                "[spawn].env value of '{}' must not contain NUL",
                key
            )));
        }
    }
    Ok(())
}

fn validate_resolve(cfg: &RawConfigFile) -> Result<()> {
    if cfg.resolve.script_runtime.trim().is_empty() {
        return Err(XvfbMaybeError::ConfigError(
            "[resolve].script_runtime must not be empty".to_string(),
        ));
    }
    Ok(())
}
