// tests/dispatch_rules.rs

use rebuildwatch::rules::{DispatchRule, DispatchTable, PostAction, ReloadSignals};

fn rule_name(table: &DispatchTable, path: &str) -> Option<String> {
    table.classify(path).map(|r| r.name.clone())
}

#[test]
fn default_categories_are_tried_in_priority_order() {
    let t = DispatchTable::defaults();

    assert_eq!(rule_name(&t, "ocamlserver/main.byte").as_deref(), Some("server-binary"));
    assert_eq!(rule_name(&t, "ocamlserver/main.native").as_deref(), Some("server-binary"));
    assert_eq!(rule_name(&t, "client/src/Main.elm").as_deref(), Some("frontend"));
    assert_eq!(rule_name(&t, "ocamlserver/_oasis").as_deref(), Some("backend-project"));
    assert_eq!(rule_name(&t, "ocamlserver/lib/foo.ml").as_deref(), Some("backend-source"));
    assert_eq!(rule_name(&t, "ocamlserver/lib/foo.mli").as_deref(), Some("backend-source"));
    assert_eq!(rule_name(&t, "README.md"), None);
}

#[test]
fn earlier_rule_shadows_later_one() {
    let t = DispatchTable::defaults();
    // Contains both ".elm" and ".ml"; the frontend rule comes first.
    assert_eq!(rule_name(&t, "client/lib.ml/Page.elm").as_deref(), Some("frontend"));
    // Compiled binary inside a path that also says ".ml".
    assert_eq!(rule_name(&t, "x.ml/main.byte").as_deref(), Some("server-binary"));
}

#[test]
fn pass_through_rule_plans_nothing() {
    let t = DispatchTable::defaults();
    let rule = t.classify("ocamlserver/main.byte").unwrap();

    assert!(rule.is_pass_through());
    assert_eq!(t.plan_for("ocamlserver/main.byte"), Some(vec![]));
}

#[test]
fn plan_puts_build_before_reload_signals() {
    let reload = ReloadSignals {
        server: "srv".to_string(),
        browser: "brw".to_string(),
    };
    let rule = DispatchRule::new("r", [".x"])
        .command("build")
        .then(PostAction::Server)
        .then(PostAction::Browser);

    assert!(!rule.is_pass_through());
    assert_eq!(rule.plan(&reload), vec!["build", "srv", "brw"]);
}

#[test]
fn reload_only_rule_is_not_a_pass_through() {
    let rule = DispatchRule::new("css", [".css"]).then(PostAction::Browser);
    assert!(!rule.is_pass_through());
    assert_eq!(rule.plan(&ReloadSignals::default()), vec!["touch .browser_trigger"]);
}
