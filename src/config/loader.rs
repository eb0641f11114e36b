// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path, validate it and compile the tables.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// `Rebuildwatch.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Rebuildwatch.toml")
}

/// Pick the configuration for this run.
///
/// - An explicit path must exist and be valid.
/// - Otherwise [`default_config_path`] is used if present.
/// - Otherwise the built-in tables apply.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        info!(path = %path.display(), "loading config");
        return load_and_validate(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        info!(path = %default_path.display(), "loading config");
        return load_and_validate(&default_path);
    }

    debug!("no config file; using built-in rule tables");
    Ok(ConfigFile::defaults())
}
