// src/config/mod.rs

//! Configuration loading and validation for rebuildwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to the built-in tables
//!   (`loader.rs`).
//! - Validate the raw tables before they are compiled (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, resolve_config};
pub use model::{
    ConfigFile, IgnoreSection, PositionalConfig, RawConfigFile, ReloadSection, RuleConfig,
};
pub use validate::validate_config;
