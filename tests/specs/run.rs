// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for the `famecheck run` command.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

// =============================================================================
// Golden output
// =============================================================================

/// Fixture 0 with `--extensions go` produces exactly the golden bytes
#[test]
fn golden_output_case_passes() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case(
        "0",
        &description("simple", &["--extensions", "go"], "simple.bundle", false),
        Some(SIMPLE_GO),
    );
    let tool = project.tool();

    project
        .run_with(&tool)
        .assert()
        .success()
        .stdout(predicates::str::contains("PASS 0/simple"))
        .stdout(predicates::str::contains("1 passed; 0 failed; 0 errors; 1 total"));
}

/// A single differing byte in stdout fails the case and the run
#[test]
fn one_byte_difference_fails() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case(
        "0",
        &description("simple", &["--extensions", "go"], "simple.bundle", false),
        Some(&SIMPLE_GO.replace("main.go", "main.gp")),
    );
    let tool = project.tool();

    project
        .run_with(&tool)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("FAIL 0/simple"))
        .stdout(predicates::str::contains("output differs from golden file"))
        .stdout(predicates::str::contains("-main.gp").and(predicates::str::contains("+main.go")));
}

/// Trailing whitespace is not normalized away
#[test]
fn trailing_whitespace_difference_fails() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case(
        "0",
        &description("simple", &["--extensions", "go"], "simple.bundle", false),
        Some(&format!("{SIMPLE_GO}\n")),
    );
    let tool = project.tool();

    project.run_with(&tool).assert().code(1).stdout(predicates::str::contains("FAIL 0/simple"));
}

// =============================================================================
// Expected failures
// =============================================================================

/// Fixture 1 with an unknown sort key must exit non-zero; its golden file is ignored
#[test]
fn expected_failure_passes_on_non_zero_exit() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case(
        "1",
        &description("bad-order", &["--order-by", "bogus"], "simple.bundle", true),
        Some("ignored\n"),
    );
    let tool = project.tool();

    project.run_with(&tool).assert().success().stdout(predicates::str::contains("PASS 1/bad-order"));
}

/// A clean exit where failure was expected fails the case
#[test]
fn expected_failure_fails_on_clean_exit() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case("1", &description("bad-order", &["--order-by", "lines"], "simple.bundle", true), None);
    let tool = project.tool();

    project
        .run_with(&tool)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("FAIL 1/bad-order"))
        .stdout(predicates::str::contains("expected non-zero exit"));
}

/// A crash is not an orderly rejection of input
#[test]
fn expected_failure_fails_on_crash() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case("1", &description("crash", &[], "simple.bundle", true), None);
    let crasher = project.script("crasher", "kill -9 $$\n");

    project
        .run_with(&crasher)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("binary did not run: terminated by signal 9"));
}

// =============================================================================
// Isolation and ordering
// =============================================================================

/// Two fixtures sharing a bundle get separate checkouts and independent results
#[test]
fn shared_bundle_cases_are_independent() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case(
        "0",
        &description("go", &["--extensions", "go"], "simple.bundle", false),
        Some(SIMPLE_GO),
    );
    project.case(
        "2",
        &description("all", &["--format", "csv"], "simple.bundle", false),
        Some("args: --format csv\nREADME.md\nmain.go\n"),
    );
    // Leaves a marker in its checkout; the other case would list it if shared
    let tool = project.script(
        "marking-tool",
        r#"repo="$2"
shift 2
echo "args: $*"
cd "$repo" && LC_ALL=C ls
touch "$repo/zz-marker"
"#,
    );

    project.run_with(&tool).args(["-j", "2"]).assert().success();
}

/// Cases are reported in numeric order, not lexical
#[test]
fn cases_reported_in_numeric_order() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    for n in ["10", "2", "1"] {
        project.case(
            n,
            &description(&format!("case{n}"), &["--extensions", "go"], "simple.bundle", false),
            Some(SIMPLE_GO),
        );
    }
    let tool = project.tool();

    let output = project.run_with(&tool).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().filter(|l| l.starts_with("PASS")).collect();
    assert_eq!(lines, vec!["PASS 1/case1", "PASS 2/case2", "PASS 10/case10"]);
}

/// --filter selects cases by `<dir>/<name>`
#[test]
fn filter_selects_cases() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case(
        "0",
        &description("go", &["--extensions", "go"], "simple.bundle", false),
        Some(SIMPLE_GO),
    );
    project.case("1", &description("broken", &[], "simple.bundle", false), Some("wrong\n"));
    let tool = project.tool();

    project
        .run_with(&tool)
        .args(["--filter", "^0/"])
        .assert()
        .success()
        .stdout(predicates::str::contains("1 total"))
        .stdout(predicates::str::contains("1/broken").not());
}

// =============================================================================
// Setup errors
// =============================================================================

/// A non-numeric fixture directory aborts the whole run
#[test]
fn non_numeric_fixture_aborts_run() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case("simple", &description("x", &[], "simple.bundle", false), Some(""));
    let tool = project.tool();

    project
        .run_with(&tool)
        .assert()
        .code(2)
        .stdout(predicates::str::is_empty())
        .stderr(predicates::str::contains("not a non-negative integer"));
}

/// A malformed description aborts the whole run
#[test]
fn malformed_description_aborts_run() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case("0", &description("ok", &[], "simple.bundle", false), Some(""));
    project.case("1", "name: [broken\n", None);
    let tool = project.tool();

    project
        .run_with(&tool)
        .assert()
        .code(2)
        .stderr(predicates::str::contains("failed to parse test description"));
}

/// A missing golden file errors only that case
#[test]
fn missing_golden_errors_one_case() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case("0", &description("no-golden", &[], "simple.bundle", false), None);
    project.case(
        "1",
        &description("go", &["--extensions", "go"], "simple.bundle", false),
        Some(SIMPLE_GO),
    );
    let tool = project.tool();

    project
        .run_with(&tool)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("ERROR 0/no-golden"))
        .stdout(predicates::str::contains("PASS 1/go"));
}

/// A corrupt bundle errors the case rather than failing verification
#[test]
fn corrupt_bundle_errors_case() {
    let project = Project::empty();
    project.file("testdata/bundles/corrupt.bundle", "garbage");
    project.case("0", &description("corrupt", &[], "corrupt.bundle", false), Some(""));
    let tool = project.tool();

    project
        .run_with(&tool)
        .assert()
        .code(1)
        .stdout(predicates::str::contains("ERROR 0/corrupt"))
        .stdout(predicates::str::contains("failed to materialize bundle"));
}

/// A missing binary is a provisioning error before any case runs
#[test]
fn missing_binary_aborts_run() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case("0", &description("x", &[], "simple.bundle", false), Some(""));

    project
        .run_with(&project.path().join("no-such-tool"))
        .assert()
        .code(2)
        .stderr(predicates::str::contains("failed to provision binary"));
}

// =============================================================================
// Output formats
// =============================================================================

/// --output json emits machine-readable results
#[test]
fn json_output_is_valid() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case(
        "0",
        &description("go", &["--extensions", "go"], "simple.bundle", false),
        Some(SIMPLE_GO),
    );
    project.case("1", &description("accepts", &[], "simple.bundle", true), None);
    let tool = project.tool();

    let output = project.run_with(&tool).args(["--output", "json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("should be valid JSON");
    assert_eq!(json["passed"], false);
    assert_eq!(json["cases"][0]["status"], "passed");
    assert_eq!(json["cases"][1]["status"], "failed");
    assert_eq!(json["cases"][1]["mismatch"]["reason"], "unexpected_success");
}

/// An invalid --filter regex is a configuration error
#[test]
fn invalid_filter_is_config_error() {
    let project = Project::empty();
    project.bundle("simple.bundle");
    project.case("0", &description("go", &[], "simple.bundle", false), Some(""));
    let tool = project.tool();

    project
        .run_with(&tool)
        .args(["--filter", "("])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("invalid --filter pattern"));
}
