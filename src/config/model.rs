// src/config/model.rs

use serde::Deserialize;

use crate::errors::{RebuildwatchError, Result};
use crate::event::ReasonCode;
use crate::filter::{scoped_rules, IgnoreFilter, IgnoreRule, IMPLICIT_IGNORE_REASONS};
use crate::rules::{DispatchRule, DispatchTable, PostAction, ReloadSignals};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [ignore]
/// reasons = ["IsDir", "PlatformSpecific"]
/// contains = [".git", "node_modules/"]
/// scoped_dir = "server"
/// scoped = ["_build", "Makefile"]
///
/// [[ignore.positional]]
/// marker = "/C"
/// end_offset = 8
///
/// [reload]
/// server = "scripts/runserver"
/// browser = "touch .browser_trigger"
///
/// [[rule]]
/// name = "frontend"
/// contains = [".elm"]
/// command = "cd client && elm-make Main.elm --output ../static/elm.js"
/// reload = ["browser"]
/// ```
///
/// Every section is optional. A missing section keeps the built-in table for
/// that section; a present one replaces it entirely, except that `IsDir` and
/// `PlatformSpecific` events are always ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub ignore: Option<IgnoreSection>,

    #[serde(default)]
    pub reload: Option<ReloadSection>,

    /// Dispatch rules from `[[rule]]`, in priority order.
    #[serde(default, rename = "rule")]
    pub rules: Option<Vec<RuleConfig>>,
}

/// `[ignore]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoreSection {
    /// Extra reasons ignored whatever the path, on top of `IsDir` and
    /// `PlatformSpecific`.
    #[serde(default)]
    pub reasons: Vec<ReasonCode>,

    /// Substrings that cause a path to be ignored.
    #[serde(default)]
    pub contains: Vec<String>,

    /// Directory prefix for `scoped`; each entry becomes `"<scoped_dir>/<entry>"`.
    #[serde(default)]
    pub scoped_dir: Option<String>,

    #[serde(default)]
    pub scoped: Vec<String>,

    #[serde(default)]
    pub positional: Vec<PositionalConfig>,
}

/// `[[ignore.positional]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionalConfig {
    pub marker: String,
    pub end_offset: usize,
}

/// `[reload]` section. Unset commands keep their built-in value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReloadSection {
    #[serde(default)]
    pub server: Option<String>,

    #[serde(default)]
    pub browser: Option<String>,
}

/// `[[rule]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub name: String,

    /// The rule matches paths containing any of these substrings.
    pub contains: Vec<String>,

    /// Command to run first; omit it for reload-only or pass-through rules.
    #[serde(default)]
    pub command: Option<String>,

    /// Reload signals to send after `command`, in order.
    #[serde(default)]
    pub reload: Vec<PostAction>,
}

/// Validated, compiled configuration: the two tables the dispatcher needs.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub filter: IgnoreFilter,
    pub table: DispatchTable,
}

impl ConfigFile {
    /// The built-in tables.
    pub fn defaults() -> Self {
        Self {
            filter: IgnoreFilter::defaults(),
            table: DispatchTable::defaults(),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::defaults()
    }
}

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RebuildwatchError;

    fn try_from(raw: RawConfigFile) -> Result<Self> {
        super::validate::validate_config(&raw)?;

        let filter = match raw.ignore {
            Some(section) => compile_ignore(section),
            None => IgnoreFilter::defaults(),
        };

        let mut reload = ReloadSignals::default();
        if let Some(section) = raw.reload {
            if let Some(server) = section.server {
                reload.server = server;
            }
            if let Some(browser) = section.browser {
                reload.browser = browser;
            }
        }

        let table = match raw.rules {
            Some(rules) => DispatchTable::new(rules.into_iter().map(compile_rule).collect(), reload),
            None => DispatchTable::new(DispatchTable::defaults().rules().to_vec(), reload),
        };

        Ok(Self { filter, table })
    }
}

fn compile_ignore(section: IgnoreSection) -> IgnoreFilter {
    let mut reasons = IMPLICIT_IGNORE_REASONS.to_vec();
    for reason in section.reasons {
        if !reasons.contains(&reason) {
            reasons.push(reason);
        }
    }

    let mut rules: Vec<IgnoreRule> = reasons.into_iter().map(IgnoreRule::Reason).collect();
    rules.extend(section.contains.into_iter().map(IgnoreRule::Contains));
    if let Some(dir) = section.scoped_dir.as_deref() {
        rules.extend(scoped_rules(dir, &section.scoped));
    }
    rules.extend(
        section
            .positional
            .into_iter()
            .map(|p| IgnoreRule::positional(p.marker, p.end_offset)),
    );
    IgnoreFilter::new(rules)
}

fn compile_rule(cfg: RuleConfig) -> DispatchRule {
    DispatchRule {
        name: cfg.name,
        contains: cfg.contains,
        command: cfg.command,
        post: cfg.reload,
    }
}
