//! Behavioral specs for the `famecheck list` command.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// `famecheck list` prints cases in numeric order with bundle and expectation
#[test]
fn list_prints_cases_in_order() {
    let project = Project::empty();
    project.case("10", &description("ten", &[], "a.bundle", false), None);
    project.case("9", &description("nine", &["--order-by", "bogus"], "b.bundle", true), None);

    famecheck_cmd()
        .arg("list")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout("9/nine\tb.bundle\terror\n10/ten\ta.bundle\toutput\n");
}

/// Listing never touches bundles or golden files
#[test]
fn list_does_not_need_bundles_or_binary() {
    let project = Project::empty();
    project.case("0", &description("simple", &[], "missing.bundle", false), None);

    famecheck_cmd().arg("list").current_dir(project.path()).assert().success();
}

/// `--output json` lists descriptions as JSON
#[test]
fn list_json_includes_args() {
    let project = Project::empty();
    project.case("0", &description("simple", &["--extensions", "go"], "simple.bundle", false), None);

    let output = famecheck_cmd()
        .args(["list", "--output", "json"])
        .current_dir(project.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["id"], "0/simple");
    assert_eq!(json[0]["args"], serde_json::json!(["--extensions", "go"]));
    assert_eq!(json[0]["error"], false);
}

/// Duplicate numeric names are a configuration error
#[test]
fn list_rejects_duplicate_numbers() {
    let project = Project::empty();
    project.case("1", &description("one", &[], "a.bundle", false), None);
    project.case("01", &description("also-one", &[], "a.bundle", false), None);

    famecheck_cmd()
        .arg("list")
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("both parse to 1"));
}

/// A missing fixture root is a configuration error
#[test]
fn list_missing_root_fails() {
    let project = Project::empty();

    famecheck_cmd()
        .arg("list")
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("failed to read test directory"));
}
