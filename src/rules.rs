// src/rules.rs

//! Dispatch rules: which commands a changed path triggers.
//!
//! Rules are tried in order and the first whose patterns match wins, so the
//! categories are mutually exclusive. A path no rule matches is reported as
//! an unknown file by the dispatcher.

use serde::Deserialize;

/// Follow-up signal sent after a rule's own command has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostAction {
    /// Restart the backend server.
    Server,
    /// Tell the browser-side watcher to refresh the page.
    Browser,
}

/// Shell commands behind each [`PostAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadSignals {
    pub server: String,
    pub browser: String,
}

impl ReloadSignals {
    pub fn command_for(&self, action: PostAction) -> &str {
        match action {
            PostAction::Server => &self.server,
            PostAction::Browser => &self.browser,
        }
    }
}

impl Default for ReloadSignals {
    fn default() -> Self {
        Self {
            server: "scripts/runserver".to_string(),
            // Picked up by a separate fswatch that drives the browser reload.
            browser: "touch .browser_trigger".to_string(),
        }
    }
}

/// One `(path predicate, command, post-actions)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRule {
    pub name: String,
    /// The rule matches if the path contains any of these substrings.
    pub contains: Vec<String>,
    pub command: Option<String>,
    pub post: Vec<PostAction>,
}

impl DispatchRule {
    pub fn new<N, P>(name: N, contains: P) -> Self
    where
        N: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            name: name.into(),
            contains: contains.into_iter().map(Into::into).collect(),
            command: None,
            post: Vec::new(),
        }
    }

    pub fn command(mut self, cmd: impl Into<String>) -> Self {
        self.command = Some(cmd.into());
        self
    }

    pub fn then(mut self, action: PostAction) -> Self {
        self.post.push(action);
        self
    }

    pub fn matches(&self, path: &str) -> bool {
        self.contains.iter().any(|p| path.contains(p.as_str()))
    }

    /// True for rules that deliberately do nothing when they match.
    pub fn is_pass_through(&self) -> bool {
        self.command.is_none() && self.post.is_empty()
    }

    /// Command lines to run for this rule, in order.
    pub fn plan(&self, reload: &ReloadSignals) -> Vec<String> {
        self.command
            .iter()
            .cloned()
            .chain(
                self.post
                    .iter()
                    .map(|action| reload.command_for(*action).to_string()),
            )
            .collect()
    }
}

/// Ordered rule list plus the reload commands the rules refer to.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    rules: Vec<DispatchRule>,
    reload: ReloadSignals,
}

impl DispatchTable {
    pub fn new(rules: Vec<DispatchRule>, reload: ReloadSignals) -> Self {
        Self { rules, reload }
    }

    /// Built-in rules for the elm client + ocaml server project layout.
    pub fn defaults() -> Self {
        let rules = vec![
            // The server build calls us directly when it relinks; reacting to
            // the binary as well would build twice.
            DispatchRule::new("server-binary", ["main.byte", "main.native"]),
            DispatchRule::new("frontend", [".elm"])
                .command("cd client && elm-make Main.elm --debug --output ../static/elm.js")
                .then(PostAction::Browser),
            DispatchRule::new("backend-project", ["_oasis"])
                .command("cd ocamlserver && oasis setup -setup-update dynamic && make")
                .then(PostAction::Server)
                .then(PostAction::Browser),
            DispatchRule::new("backend-source", [".ml"])
                .command("cd ocamlserver && make")
                .then(PostAction::Server)
                .then(PostAction::Browser),
        ];

        Self::new(rules, ReloadSignals::default())
    }

    pub fn rules(&self) -> &[DispatchRule] {
        &self.rules
    }

    pub fn reload(&self) -> &ReloadSignals {
        &self.reload
    }

    /// First rule matching `path`.
    pub fn classify(&self, path: &str) -> Option<&DispatchRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// Commands for `path`, or `None` if no rule matches.
    pub fn plan_for(&self, path: &str) -> Option<Vec<String>> {
        self.classify(path).map(|rule| rule.plan(&self.reload))
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::defaults()
    }
}
