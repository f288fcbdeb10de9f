//! End-to-end tests driving the `longecho` binary.

mod common;

use common::{json, OutputAssertions, TestContext};
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let ctx = TestContext::new();
    ctx.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("discover"))
        .stdout(predicate::str::contains("manifest"))
        .stdout(predicate::str::contains("build"));
}

#[test]
fn test_check_compliant() {
    let ctx = TestContext::new();
    ctx.source("data", "# My Data\n\nSome records.\n");

    ctx.command()
        .args(["check", "data", "--details"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ECHO-compliant:"))
        .stdout(predicate::str::contains("Name: My Data"))
        .stdout(predicate::str::contains("Durable formats: .json"));
}

#[test]
fn test_check_without_readme_fails() {
    let ctx = TestContext::new();
    ctx.file("data/data.json", "{}");

    let output = ctx.command().args(["check", "data"]).output().unwrap();
    output.assert_exit_code(1);
    output.assert_stdout_contains("Not ECHO-compliant");
    output.assert_stdout_contains("No README.md or README.txt found");
}

#[test]
fn test_check_json_reports_reason() {
    let ctx = TestContext::new();
    ctx.file("notes/README.md", "# Notes\n");

    let output = ctx
        .command()
        .args(["--format", "json", "check", "notes"])
        .output()
        .unwrap();
    output.assert_exit_code(1);

    let value = json::parse_output(&output.stdout);
    assert_eq!(value["compliant"], false);
    assert_eq!(value["reason"], "No durable data formats found");
}

#[test]
fn test_discover_finds_nested_sources() {
    let ctx = TestContext::new();
    ctx.source("archive", "# Archive\n");
    ctx.source("archive/photos", "# Photos\n");
    ctx.source("archive/.git/objects", "# Hidden\n");
    ctx.source("archive/node_modules/pkg", "# Package\n");

    let output = ctx
        .command()
        .args(["--format", "json", "discover", "archive"])
        .output()
        .unwrap();
    output.assert_success();

    let value = json::parse_output(&output.stdout);
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Archive", "Photos"]);
}

#[test]
fn test_discover_respects_max_depth() {
    let ctx = TestContext::new();
    ctx.source("root", "# Root\n");
    ctx.source("root/a/b", "# Deep\n");

    ctx.command()
        .args(["discover", "root", "-d", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 ECHO source(s):"))
        .stdout(predicate::str::contains("Deep").not());
}

#[test]
fn test_discover_missing_root() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["discover", "does-not-exist"])
        .output()
        .unwrap();
    output.assert_exit_code(6);
}

#[test]
fn test_search_is_case_insensitive() {
    let ctx = TestContext::new();
    ctx.source("root/birds", "# Birds\n\nField notes on Herons and egrets.\n");
    ctx.source("root/fish", "# Fish\n\nSalmon counts.\n");

    ctx.command()
        .args(["search", "root", "HERON"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 matching source(s):"))
        .stdout(predicate::str::contains("birds"))
        .stdout(predicate::str::contains("fish").not());

    ctx.command()
        .args(["search", "root", "whales"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No ECHO sources matching 'whales' found"));
}

#[test]
fn test_info_uses_frontmatter() {
    let ctx = TestContext::new();
    ctx.source(
        "data",
        "---\nname: Census\ndescription: Population tables\n---\n# Ignored Title\n",
    );

    let output = ctx
        .command()
        .args(["--format", "json", "info", "data"])
        .output()
        .unwrap();
    output.assert_success();

    let value = json::parse_output(&output.stdout);
    assert_eq!(value["name"], "Census");
    assert_eq!(value["description"], "Population tables");
}

#[test]
fn test_info_not_a_source() {
    let ctx = TestContext::new();
    std::fs::create_dir(ctx.path().join("empty")).unwrap();

    let output = ctx.command().args(["info", "empty"]).output().unwrap();
    output.assert_exit_code(1);
    output.assert_stdout_contains("Not an ECHO source");
}

#[test]
fn test_formats_lists_categories() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["--format", "json", "formats"])
        .output()
        .unwrap();
    output.assert_success();

    let value = json::parse_output(&output.stdout);
    assert_eq!(value.as_array().unwrap().len(), 5);
    assert_eq!(value[0]["category"], "Structured data");
}

#[test]
fn test_config_adds_durable_extension() {
    let ctx = TestContext::new().with_config("policy:\n  extra_durable_extensions: [parquet]\n");
    ctx.file("data/README.md", "# Columnar\n");
    ctx.file("data/table.parquet", "PAR1");

    ctx.command()
        .args(["check", "data"])
        .assert()
        .success();

    ctx.command()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configured:"))
        .stdout(predicate::str::contains(".parquet"));
}

#[test]
fn test_missing_config_file_is_config_error() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["--config", "missing.yaml", "formats"])
        .output()
        .unwrap();
    output.assert_exit_code(2);
}

#[test]
fn test_archive_orders_curated_sources_first() {
    let ctx = TestContext::new();
    ctx.source("archive", "# Archive\n");
    ctx.source("archive/alpha", "# Alpha\n");
    ctx.source("archive/beta", "# Beta\n");
    ctx.file(
        "archive/manifest.json",
        r#"{"version": "1.0", "name": "My Archive", "description": "Everything",
            "sources": [{"path": "beta", "order": 1, "name": "Curated Beta"}]}"#,
    );

    let output = ctx
        .command()
        .args(["--format", "json", "archive", "archive"])
        .output()
        .unwrap();
    output.assert_success();

    let value = json::parse_output(&output.stdout);
    assert_eq!(value["name"], "My Archive");
    assert_eq!(value["description"], "Everything");

    let sources = value["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["name"], "Curated Beta");
    assert_eq!(sources[0]["order"], 1);
    assert_eq!(sources[1]["name"], "Alpha");
    assert_eq!(sources[1]["order"], 100);
}

#[test]
fn test_archive_rejects_invalid_manifest() {
    let ctx = TestContext::new();
    ctx.source("archive", "# Archive\n");
    ctx.file("archive/manifest.json", r#"{"name": "No version"}"#);

    let output = ctx.command().args(["archive", "archive"]).output().unwrap();
    output.assert_exit_code(5);
}

#[test]
fn test_manifest_init_then_validate() {
    let ctx = TestContext::new();
    ctx.source("data", "# Weather Logs\n\nDaily readings since 1990.\n");

    ctx.command()
        .args(["manifest", "init", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manifest.json"));

    let written = std::fs::read_to_string(ctx.path().join("data/manifest.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["version"], "1.0");
    assert_eq!(value["name"], "Weather Logs");
    assert_eq!(value["description"], "Daily readings since 1990.");

    ctx.command()
        .args(["manifest", "validate", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid manifest"));
}

#[test]
fn test_manifest_init_refuses_overwrite() {
    let ctx = TestContext::new();
    ctx.source("data", "# Data\n");
    ctx.file("data/manifest.yaml", "version: '1.0'\nname: Old\ndescription: Old\n");

    let output = ctx
        .command()
        .args(["manifest", "init", "data", "--name", "New"])
        .output()
        .unwrap();
    output.assert_exit_code(5);

    ctx.command()
        .args(["manifest", "init", "data", "--name", "New", "--force"])
        .assert()
        .success();
    assert!(ctx.path().join("data/manifest.json").is_file());
}

#[test]
fn test_manifest_init_yaml() {
    let ctx = TestContext::new();
    std::fs::create_dir(ctx.path().join("plain")).unwrap();

    ctx.command()
        .args(["manifest", "init", "plain", "--manifest-format", "yaml"])
        .assert()
        .success();

    let written = std::fs::read_to_string(ctx.path().join("plain/manifest.yaml")).unwrap();
    assert!(written.contains("name: plain"));
}

#[test]
fn test_manifest_validate_reports_errors() {
    let ctx = TestContext::new();
    let file = ctx.file(
        "manifest.json",
        r#"{"version": "2.0", "name": "X", "type": "video", "sources": [{}]}"#,
    );

    let output = ctx
        .command()
        .args(["manifest", "validate"])
        .arg(&file)
        .output()
        .unwrap();
    output.assert_exit_code(5);
    output.assert_stdout_contains("Unsupported version: 2.0");
    output.assert_stdout_contains("Missing required field: description");
    output.assert_stdout_contains("Invalid type: video");
    output.assert_stdout_contains("sources[0] missing required field: path");
}

#[test]
fn test_quiet_suppresses_text() {
    let ctx = TestContext::new();
    ctx.source("data", "# Data\n");

    let output = ctx
        .command()
        .args(["-q", "check", "data"])
        .output()
        .unwrap();
    output.assert_success();
    assert!(output.stdout.is_empty());
}

/// Archive with a manifest curating two sources that carry sub-manifests.
fn archive_with_sources(ctx: &TestContext) {
    ctx.file(
        "archive/README.md",
        "# Test Archive\n\nA test archive with multiple sources.\n",
    );
    ctx.file("archive/index.json", "{}");
    ctx.file(
        "archive/manifest.json",
        r#"{"version": "1.0", "name": "Test Archive", "description": "A test archive",
            "sources": [{"path": "conversations/", "order": 1},
                        {"path": "bookmarks/", "order": 2}]}"#,
    );
    ctx.file("archive/conversations/README.md", "# Conversations\n\nChat history.\n");
    ctx.file("archive/conversations/conversations.db", "");
    ctx.file(
        "archive/conversations/manifest.json",
        r#"{"version": "1.0", "name": "Conversations", "description": "Chat history", "icon": "chat"}"#,
    );
    ctx.file("archive/bookmarks/README.md", "# Bookmarks\n\nSaved links.\n");
    ctx.file("archive/bookmarks/bookmarks.jsonl", "{}\n");
    ctx.file(
        "archive/bookmarks/manifest.json",
        r#"{"version": "1.0", "name": "Bookmarks", "description": "Saved links", "icon": "bookmark"}"#,
    );
}

#[test]
fn test_build_writes_site() {
    let ctx = TestContext::new();
    archive_with_sources(&ctx);

    ctx.command()
        .args(["build", "archive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built site with 2 source(s)"))
        .stdout(predicate::str::contains("Output:"));

    let site = ctx.path().join("archive/site");
    let index = std::fs::read_to_string(site.join("index.html")).unwrap();
    assert!(index.contains("Test Archive"));
    assert!(site.join("conversations/index.html").is_file());
    assert!(site.join("bookmarks/index.html").is_file());

    let page = std::fs::read_to_string(site.join("conversations/index.html")).unwrap();
    assert!(page.contains("Conversations"));
    assert!(page.to_lowercase().contains("chat history"));
}

#[test]
fn test_build_custom_output_json() {
    let ctx = TestContext::new();
    archive_with_sources(&ctx);

    let output = ctx
        .command()
        .args(["--format", "json", "build", "archive", "--output", "public"])
        .output()
        .unwrap();
    output.assert_success();

    let value = json::parse_output(&output.stdout);
    assert_eq!(value["name"], "Test Archive");
    assert_eq!(value["sources_count"], 2);
    assert_eq!(value["pages"][0]["name"], "Conversations");
    assert!(ctx.path().join("public/index.html").is_file());
    assert!(!ctx.path().join("archive/site").exists());
}

#[test]
fn test_build_bundles_source_sites() {
    let ctx = TestContext::new();
    archive_with_sources(&ctx);
    ctx.file("archive/bookmarks/site/index.html", "<html>viewer</html>");

    ctx.command()
        .args(["build", "archive", "--bundle"])
        .assert()
        .success();
    assert!(ctx
        .path()
        .join("archive/site/bookmarks/site/index.html")
        .is_file());
}

#[test]
fn test_build_uses_readme_without_manifest() {
    let ctx = TestContext::new();
    ctx.source("plain", "# Plain Archive\n\nNo manifest here.\n");
    ctx.source("plain/photos", "# Photos\n");

    ctx.command()
        .args(["build", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built site with 1 source(s)"));

    let index = std::fs::read_to_string(ctx.path().join("plain/site/index.html")).unwrap();
    assert!(index.contains("Plain Archive"));
    assert!(index.contains("photos/index.html"));
}

#[test]
fn test_build_not_compliant_fails() {
    let ctx = TestContext::new();
    ctx.file("bare/notes.bin", "");

    let output = ctx.command().args(["build", "bare"]).output().unwrap();
    output.assert_exit_code(1);
    assert!(!ctx.path().join("bare/site").exists());
}

#[test]
fn test_build_missing_path() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["build", "does-not-exist"])
        .output()
        .unwrap();
    output.assert_exit_code(6);
}
