// src/config/mod.rs

//! Configuration loading and validation for xvfb-maybe.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants before anything is spawned (`validate.rs`).
//!
//! The config file is optional; without one every section takes its
//! defaults.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{config_path_from_env, load_and_validate, load_from_path, load_optional};
pub use model::{ConfigFile, RawConfigFile, ResolveSection, SpawnSection, XvfbSection};
