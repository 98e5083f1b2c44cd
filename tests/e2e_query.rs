mod common;
use common::cli::{YconfWorkspace, run_yconf, run_yconf_stdin};

const DOC: &str = "some: thing\nhere: goes\ncommand:\n  path: /here/we/go\n";

fn seeded() -> YconfWorkspace {
    let workspace = YconfWorkspace::new();
    let write = run_yconf_stdin(&workspace, ["write"], DOC, "seed");
    assert!(write.status.success(), "seed failed: {}", write.stderr);
    workspace
}

#[test]
fn test_query_identity_and_fields() {
    let workspace = seeded();

    let all = run_yconf(&workspace, ["query", "."], "identity");
    assert!(all.status.success());
    assert_eq!(
        all.stdout,
        "{\n  \"command\": {\n    \"path\": \"/here/we/go\"\n  },\n  \"here\": \"goes\",\n  \"some\": \"thing\"\n}\n"
    );

    let some = run_yconf(&workspace, ["q", ".some"], "some");
    assert_eq!(some.stdout, "thing\n");

    let here = run_yconf(&workspace, ["query", ".here"], "here");
    assert_eq!(here.stdout, "goes\n");

    let nested = run_yconf(&workspace, ["query", ".command.path"], "nested");
    assert_eq!(nested.stdout, "/here/we/go\n");
}

#[test]
fn test_query_yaml_output() {
    let workspace = seeded();
    let out = run_yconf(&workspace, ["query", ".command", "--format", "yaml"], "yaml");
    assert!(out.status.success());
    assert_eq!(out.stdout, "path: /here/we/go\n");
}

#[test]
fn test_query_bad_selector_prints_empty_and_warns() {
    let workspace = seeded();
    let out = run_yconf(&workspace, ["query", ".command["], "bad");
    assert!(out.status.success());
    assert_eq!(out.stdout, "\n");
    assert!(out.stderr.contains("WARN"));

    let quiet = run_yconf(&workspace, ["query", ".command[", "-q"], "bad_quiet");
    assert!(quiet.status.success());
    assert!(quiet.stderr.is_empty());
}

#[test]
fn test_query_missing_config_is_empty() {
    let workspace = YconfWorkspace::new();
    let out = run_yconf(&workspace, ["query", ".some"], "missing");
    assert!(out.status.success());
    assert_eq!(out.stdout, "\n");
    assert!(out.stderr.is_empty());
}

#[test]
fn test_query_unmatched_is_empty() {
    let workspace = seeded();
    let out = run_yconf(&workspace, ["query", ".nope.deeper"], "unmatched");
    assert!(out.status.success());
    assert_eq!(out.stdout, "\n");
}
