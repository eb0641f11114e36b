// tests/config_loading.rs

use std::error::Error;
use std::io::Write;

use tempfile::NamedTempFile;
use rebuildwatch::config::{load_and_validate, resolve_config, ConfigFile};
use rebuildwatch::errors::RebuildwatchError;
use rebuildwatch::event::ReasonCode;
use rebuildwatch::rules::PostAction;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn expect_config_error(contents: &str, needle: &str) {
    let file = write_config(contents);
    match load_and_validate(file.path()) {
        Err(RebuildwatchError::ConfigError(msg)) => {
            assert!(msg.contains(needle), "{msg:?} should mention {needle:?}")
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_file_keeps_builtin_tables() -> TestResult {
    let file = write_config("");
    let cfg = load_and_validate(file.path())?;
    let defaults = ConfigFile::defaults();

    assert_eq!(cfg.filter.rules(), defaults.filter.rules());
    assert_eq!(cfg.table.rules(), defaults.table.rules());
    assert_eq!(cfg.table.reload(), defaults.table.reload());
    Ok(())
}

#[test]
fn full_config_replaces_tables() -> TestResult {
    let file = write_config(
        r#"
[ignore]
reasons = ["IsDir"]
contains = ["node_modules/"]
scoped_dir = "server"
scoped = ["_build"]

[[ignore.positional]]
marker = "~"
end_offset = 0

[reload]
browser = "touch .reload"

[[rule]]
name = "styles"
contains = [".css"]
reload = ["browser"]

[[rule]]
name = "server"
contains = [".rs"]
command = "cargo build"
reload = ["server", "browser"]
"#,
    );

    let cfg = load_and_validate(file.path())?;

    let f = &cfg.filter;
    assert!(f.should_ignore("web/node_modules/x.js", &ReasonCode::Updated));
    assert!(f.should_ignore("server/_build/out", &ReasonCode::Updated));
    assert!(f.should_ignore("src/main.rs~", &ReasonCode::Updated));
    assert!(f.should_ignore("anything", &ReasonCode::IsDir));
    // Built-in path entries are gone once [ignore] is given.
    assert!(!f.should_ignore(".git/HEAD", &ReasonCode::Updated));
    assert!(f.should_ignore("anything", &ReasonCode::PlatformSpecific));

    let t = &cfg.table;
    assert_eq!(t.reload().server, "scripts/runserver");
    assert_eq!(t.reload().browser, "touch .reload");
    assert_eq!(t.rules().len(), 2);
    assert_eq!(t.rules()[1].post, vec![PostAction::Server, PostAction::Browser]);

    assert_eq!(t.plan_for("site/a.css"), Some(vec!["touch .reload".to_string()]));
    assert_eq!(
        t.plan_for("src/main.rs"),
        Some(vec![
            "cargo build".to_string(),
            "scripts/runserver".to_string(),
            "touch .reload".to_string(),
        ])
    );
    assert_eq!(t.plan_for("main.elm"), None);
    Ok(())
}

#[test]
fn ignore_section_without_reasons_still_ignores_dirs_and_platform_noise() -> TestResult {
    let file = write_config("[ignore]\ncontains = [\".git\"]\n");
    let cfg = load_and_validate(file.path())?;
    let f = &cfg.filter;

    assert!(f.should_ignore("client/src", &ReasonCode::IsDir));
    assert!(f.should_ignore("client/src/Main.elm", &ReasonCode::PlatformSpecific));
    assert!(f.should_ignore(".git/HEAD", &ReasonCode::Updated));
    assert!(!f.should_ignore("client/src/Main.elm", &ReasonCode::Updated));
    Ok(())
}

#[test]
fn listed_reasons_add_to_the_implicit_ones() -> TestResult {
    let file = write_config("[ignore]\nreasons = [\"Removed\", \"IsDir\"]\n");
    let cfg = load_and_validate(file.path())?;
    let f = &cfg.filter;

    assert!(f.should_ignore("a.ml", &ReasonCode::Removed));
    assert!(f.should_ignore("a.ml", &ReasonCode::IsDir));
    assert!(f.should_ignore("a.ml", &ReasonCode::PlatformSpecific));
    assert!(!f.should_ignore("a.ml", &ReasonCode::Updated));
    // IsDir is listed only once.
    assert_eq!(f.rules().len(), 3);
    Ok(())
}

#[test]
fn reload_section_alone_keeps_default_rules() -> TestResult {
    let file = write_config("[reload]\nserver = \"systemctl --user restart app\"\n");
    let cfg = load_and_validate(file.path())?;

    assert_eq!(
        cfg.table.plan_for("ocamlserver/lib/a.ml"),
        Some(vec![
            "cd ocamlserver && make".to_string(),
            "systemctl --user restart app".to_string(),
            "touch .browser_trigger".to_string(),
        ])
    );
    Ok(())
}

#[test]
fn explicit_missing_config_is_an_io_error() {
    let result = resolve_config(Some(std::path::Path::new("/definitely/not/here.toml")));
    assert!(matches!(result, Err(RebuildwatchError::IoError(_))));
}

#[test]
fn invalid_toml_is_a_toml_error() {
    let file = write_config("[[rule]\nname = ");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(RebuildwatchError::TomlError(_))
    ));
}

#[test]
fn unknown_keys_are_rejected() {
    let file = write_config("[reload]\nsrever = \"x\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(RebuildwatchError::TomlError(_))
    ));
}

#[test]
fn unknown_reload_action_is_rejected() {
    let file = write_config("[[rule]]\nname = \"a\"\ncontains = [\".a\"]\nreload = [\"database\"]\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(RebuildwatchError::TomlError(_))
    ));
}

#[test]
fn duplicate_rule_names_are_rejected() {
    expect_config_error(
        r#"
[[rule]]
name = "a"
contains = [".a"]

[[rule]]
name = "a"
contains = [".b"]
"#,
        "duplicate rule name 'a'",
    );
}

#[test]
fn rule_without_patterns_is_rejected() {
    expect_config_error(
        "[[rule]]\nname = \"a\"\ncontains = []\ncommand = \"make\"\n",
        "no `contains` patterns",
    );
}

#[test]
fn empty_pattern_is_rejected() {
    expect_config_error(
        "[[rule]]\nname = \"a\"\ncontains = [\"\"]\n",
        "empty `contains` pattern",
    );
    expect_config_error("[ignore]\ncontains = [\"\"]\n", "[ignore].contains");
}

#[test]
fn blank_command_is_rejected() {
    expect_config_error(
        "[[rule]]\nname = \"a\"\ncontains = [\".a\"]\ncommand = \"  \"\n",
        "blank `command`",
    );
    expect_config_error("[reload]\nbrowser = \"\"\n", "[reload].browser");
}

#[test]
fn scoped_entries_need_a_directory() {
    expect_config_error("[ignore]\nscoped = [\"_build\"]\n", "scoped_dir");
}

#[test]
fn empty_positional_marker_is_rejected() {
    expect_config_error(
        "[ignore]\n[[ignore.positional]]\nmarker = \"\"\nend_offset = 3\n",
        "marker must not be empty",
    );
}
