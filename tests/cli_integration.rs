use assert_cmd::Command;
use regex::Regex;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Run {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

fn normalize_output(text: &str, out_dir: &Path) -> String {
    let out = text.replace(&out_dir.display().to_string(), "<OUT>");

    // Redact version numbers such as `0.1.0-alpha.1`.
    let re_version = Regex::new(r#""version": "[^"]+""#).unwrap();
    re_version.replace_all(&out, r#""version": "<VERSION>""#).to_string()
}

fn run_js_mutant(args: &[&str], out_dir: &Path) -> Run {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("js-mutant"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("RUST_BACKTRACE", "0")
        .env_remove("RUST_LOG")
        .output()
        .expect("command should run");

    Run {
        code: output.status.code(),
        stdout: normalize_output(&String::from_utf8_lossy(&output.stdout), out_dir),
        stderr: normalize_output(&String::from_utf8_lossy(&output.stderr), out_dir),
    }
}

fn out_arg(dir: &TempDir) -> String {
    dir.path().display().to_string()
}

#[test]
fn help_lists_the_subcommands() {
    let td = TempDir::new().expect("TempDir should create");
    let run = run_js_mutant(&["--help"], td.path());

    assert_eq!(run.code, Some(0));
    for sub in ["instrument", "disable-type-checks", "mutators"] {
        assert!(run.stdout.contains(sub), "{}", run.stdout);
    }
}

#[test]
fn mutators_lists_the_catalog() {
    let td = TempDir::new().expect("TempDir should create");
    let run = run_js_mutant(&["mutators"], td.path());

    assert_eq!(run.code, Some(0));
    let names: Vec<&str> = run
        .stdout
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(names.len(), 14);
    assert_eq!(names[0], "ArithmeticOperator");
    assert_eq!(names[13], "UpdateOperator");
}

#[test]
fn instrument_summary_snapshot() {
    let td = TempDir::new().expect("TempDir should create");
    let out = out_arg(&td);
    let run = run_js_mutant(
        &["instrument", "tests/fixtures/add.js", "--out-dir", &out],
        td.path(),
    );

    assert_eq!(run.code, Some(0), "{}", run.stderr);
    insta::assert_snapshot!(run.stdout, @r"
    js-mutant: instrument
    files: 1
    --- instrument summary ---
    files instrumented: 1
    files failed:       0
    mutants total:      2
    mutants placed:     2
    mutants ignored:    0
    --- mutants per mutator ---
    ArithmeticOperator: 1 (0 ignored)
    BlockStatement: 1 (0 ignored)
    output: <OUT>
    ");

    let instrumented = fs::read_to_string(td.path().join("tests/fixtures/add.js"))
        .expect("instrumented file should be written");
    assert!(instrumented.starts_with("var __global_69fa48 = "), "{instrumented}");
    assert!(instrumented.contains("__global_69fa48.__activeMutant__ === 1 ? a - b"));

    let json = fs::read_to_string(td.path().join("mutants.json")).expect("mutants.json");
    let mutants: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    let mutants = mutants.as_array().expect("an array");
    assert_eq!(mutants.len(), 2);
    assert_eq!(mutants[1]["id"], 1);
    assert_eq!(mutants[1]["mutatorName"], "ArithmeticOperator");
    assert_eq!(mutants[1]["replacement"], "a - b");
    assert_eq!(mutants[1]["location"]["start"]["line"], 1);
    assert_eq!(mutants[1]["location"]["start"]["column"], 9);
}

#[test]
fn excluded_mutators_are_reported_as_ignored() {
    let td = TempDir::new().expect("TempDir should create");
    let out = out_arg(&td);
    let run = run_js_mutant(
        &[
            "instrument",
            "tests/fixtures/add.js",
            "--out-dir",
            &out,
            "--exclude-mutation",
            "BlockStatement",
            "-v",
        ],
        td.path(),
    );

    assert_eq!(run.code, Some(0), "{}", run.stderr);
    assert!(run.stdout.contains("mutants ignored:    1"), "{}", run.stdout);
    assert!(run.stdout.contains("BlockStatement: 1 (1 ignored)"));
    assert!(run.stdout.contains(
        "#1 tests/fixtures/add.js:2:10 ArithmeticOperator: \"a - b\""
    ));
    assert!(
        run.stdout
            .lines()
            .any(|l| l.starts_with("#0 tests/fixtures/add.js:1:27 BlockStatement") && l.ends_with("(ignored)")),
        "{}",
        run.stdout
    );
}

#[test]
fn failed_files_are_reported_and_skipped() {
    let td = TempDir::new().expect("TempDir should create");
    let out = out_arg(&td);
    let run = run_js_mutant(
        &[
            "instrument",
            "tests/fixtures/broken.js",
            "tests/fixtures/add.js",
            "--out-dir",
            &out,
        ],
        td.path(),
    );

    assert_eq!(run.code, Some(1));
    assert!(
        run.stderr
            .contains("failed to instrument: syntax error in tests/fixtures/broken.js:1:"),
        "{}",
        run.stderr
    );
    assert!(run.stderr.contains("1 file(s) could not be instrumented"));
    assert!(run.stdout.contains("files failed:       1"));

    assert!(td.path().join("tests/fixtures/add.js").exists());
    assert!(!td.path().join("tests/fixtures/broken.js").exists());

    // Ids stay dense for the emitted file.
    let json = fs::read_to_string(td.path().join("mutants.json")).expect("mutants.json");
    let mutants: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    let ids: Vec<u64> = mutants
        .as_array()
        .expect("an array")
        .iter()
        .filter_map(|m| m["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn json_report_keeps_stdout_machine_readable() {
    let td = TempDir::new().expect("TempDir should create");
    let out = out_arg(&td);
    let run = run_js_mutant(
        &[
            "instrument",
            "tests/fixtures/add.js",
            "tests/fixtures/broken.js",
            "--out-dir",
            &out,
            "--json",
        ],
        td.path(),
    );

    assert_eq!(run.code, Some(1));
    let report: serde_json::Value = serde_json::from_str(&run.stdout).expect("stdout is json");
    assert_eq!(report["tool"], "js-mutant");
    assert_eq!(report["version"], "<VERSION>");
    assert_eq!(report["files"], serde_json::json!(["tests/fixtures/add.js"]));
    assert_eq!(report["mutants"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["failures"][0]["file"], "tests/fixtures/broken.js");
    assert!(report.get("error").is_none());

    // Human output moved to stderr.
    assert!(run.stderr.contains("js-mutant: instrument"));
}

#[test]
fn unknown_mutator_fails_the_run() {
    let td = TempDir::new().expect("TempDir should create");
    let out = out_arg(&td);
    let run = run_js_mutant(
        &[
            "instrument",
            "tests/fixtures/add.js",
            "--out-dir",
            &out,
            "--exclude-mutation",
            "Nope",
            "--json",
        ],
        td.path(),
    );

    assert_eq!(run.code, Some(1));
    let report: serde_json::Value = serde_json::from_str(&run.stdout).expect("stdout is json");
    let error = report["error"].as_str().expect("an error message");
    assert!(error.starts_with("invalid options: unknown mutator \"Nope\""), "{error}");
    assert!(!td.path().join("mutants.json").exists());
}

#[test]
fn invalid_mutation_range_is_a_usage_error() {
    let td = TempDir::new().expect("TempDir should create");
    let out = out_arg(&td);
    let run = run_js_mutant(
        &[
            "instrument",
            "tests/fixtures/add.js",
            "--out-dir",
            &out,
            "--mutation-range",
            "add.js",
        ],
        td.path(),
    );

    assert_eq!(run.code, Some(2));
    assert!(run.stderr.contains("expected FILE:START-END"), "{}", run.stderr);
}

#[test]
fn markup_scripts_are_instrumented_in_place() {
    let td = TempDir::new().expect("TempDir should create");
    let out = out_arg(&td);
    let run = run_js_mutant(
        &["instrument", "tests/fixtures/page.html", "--out-dir", &out],
        td.path(),
    );

    assert_eq!(run.code, Some(0), "{}", run.stderr);
    assert!(run.stdout.contains("BooleanLiteral: 1 (0 ignored)"), "{}", run.stdout);

    let html = fs::read_to_string(td.path().join("tests/fixtures/page.html")).expect("written");
    assert!(html.starts_with("<!doctype html>\n<div id=\"app\"></div>\n<script>\n"));
    assert!(html.contains("__activeMutant__ === 0 ? false"), "{html}");
    assert!(html.ends_with("</script>\n"));
}

#[test]
fn disable_type_checks_writes_processed_files() {
    let td = TempDir::new().expect("TempDir should create");
    let out = out_arg(&td);
    let run = run_js_mutant(
        &["disable-type-checks", "tests/fixtures/greet.ts", "--out-dir", &out],
        td.path(),
    );

    assert_eq!(run.code, Some(0), "{}", run.stderr);
    insta::assert_snapshot!(run.stdout, @"disabled type checks in 1 file(s), output: <OUT>");

    let processed = fs::read_to_string(td.path().join("tests/fixtures/greet.ts")).expect("written");
    assert_eq!(
        processed,
        "#!/usr/bin/env node\n// @ts-nocheck\n\n// \nconst name: string = 42;\n"
    );
}
