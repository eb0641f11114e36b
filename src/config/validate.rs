// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{IgnoreSection, RawConfigFile, ReloadSection, RuleConfig};
use crate::errors::{RebuildwatchError, Result};

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `[[rule]]`, when present, has at least one entry
/// - rule names are non-empty and unique
/// - every rule has at least one non-empty `contains` pattern
/// - a rule's `command`, when set, is not blank
/// - ignore substrings and positional markers are non-empty (an empty
///   substring would ignore every event)
/// - `scoped` entries come with a `scoped_dir`
/// - reload commands are not blank
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    if let Some(rules) = &cfg.rules {
        validate_rules(rules)?;
    }
    if let Some(ignore) = &cfg.ignore {
        validate_ignore(ignore)?;
    }
    if let Some(reload) = &cfg.reload {
        validate_reload(reload)?;
    }
    Ok(())
}

fn config_error(msg: impl Into<String>) -> RebuildwatchError {
    RebuildwatchError::ConfigError(msg.into())
}

fn validate_rules(rules: &[RuleConfig]) -> Result<()> {
    if rules.is_empty() {
        return Err(config_error("config must contain at least one [[rule]] entry"));
    }

    let mut seen = HashSet::new();
    for rule in rules {
        if rule.name.trim().is_empty() {
            return Err(config_error("rule with an empty `name`"));
        }
        if !seen.insert(rule.name.as_str()) {
            return Err(config_error(format!(
                "duplicate rule name '{}'",
                rule.name
            )));
        }
        if rule.contains.is_empty() {
            return Err(config_error(format!(
                "rule '{}' has no `contains` patterns",
                rule.name
            )));
        }
        if rule.contains.iter().any(|p| p.is_empty()) {
            return Err(config_error(format!(
                "rule '{}' has an empty `contains` pattern",
                rule.name
            )));
        }
        if let Some(cmd) = &rule.command {
            if cmd.trim().is_empty() {
                return Err(config_error(format!(
                    "rule '{}' has a blank `command`",
                    rule.name
                )));
            }
        }
    }
    Ok(())
}

fn validate_ignore(ignore: &IgnoreSection) -> Result<()> {
    if ignore.contains.iter().any(|s| s.is_empty()) {
        return Err(config_error("[ignore].contains has an empty entry"));
    }
    if ignore.scoped.iter().any(|s| s.is_empty()) {
        return Err(config_error("[ignore].scoped has an empty entry"));
    }
    if !ignore.scoped.is_empty() && ignore.scoped_dir.is_none() {
        return Err(config_error("[ignore].scoped requires [ignore].scoped_dir"));
    }
    if ignore.positional.iter().any(|p| p.marker.is_empty()) {
        return Err(config_error("[[ignore.positional]] marker must not be empty"));
    }
    Ok(())
}

fn validate_reload(reload: &ReloadSection) -> Result<()> {
    for (name, cmd) in [("server", &reload.server), ("browser", &reload.browser)] {
        if cmd.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(config_error(format!("[reload].{name} must not be blank")));
        }
    }
    Ok(())
}
