use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn letop() -> Command {
    let mut cmd = Command::cargo_bin("letop").unwrap();
    cmd.env_remove("LETOP_FORMAT").env_remove("LETOP_LOG").env("LETOP_COLOR", "never");
    cmd
}

#[test]
fn number_plus_float_promotes() {
    letop()
        .args(["apply", "10", "+=", "2.5"])
        .assert()
        .success()
        .stdout("12.5\n");
}

#[test]
fn subtract_accepts_hyphen_values() {
    letop()
        .args(["apply", "--", "-4", "-=", "-6"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn subtract_operator_after_positional() {
    letop()
        .args(["apply", "10", "-=", "3"])
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn string_concat_with_number() {
    letop()
        .args(["apply", "\"ab\"", ".=", "12"])
        .assert()
        .success()
        .stdout("ab12\n");
}

#[test]
fn list_extension_json_output() {
    letop()
        .args(["--format", "json", "apply", "[1, 2]", "+=", "[3, 4]"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"list""#))
        .stdout(predicate::str::contains(r#""value":[1,2,3,4]"#));
}

#[test]
fn float_concat_is_rejected_with_hint() {
    letop()
        .args(["apply", "1.5", ".=", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Assignment error: E734: Wrong variable type for .="))
        .stderr(predicate::str::contains("Help: Floats cannot be concatenated"));
}

#[test]
fn dict_operand_is_rejected() {
    letop()
        .args(["apply", "1", "+=", r#"{"a": 1}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E734"))
        .stderr(predicate::str::contains("Funcref and Dict"));
}

#[test]
fn bad_literal_is_parse_error() {
    letop()
        .args(["apply", "[1,", "+=", "[2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error: invalid target literal"));
}

#[test]
fn unknown_operator_is_parse_error() {
    letop()
        .args(["apply", "1", "*=", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown compound operator '*='"));
}

#[test]
fn matrix_lists_every_operator() {
    letop()
        .arg("matrix")
        .assert()
        .success()
        .stdout(predicate::str::contains("target +="))
        .stdout(predicate::str::contains("target -="))
        .stdout(predicate::str::contains("target .="))
        .stdout(predicate::str::contains("E734"));
}

#[test]
fn batch_reports_each_line() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("cases.jsonl");
    std::fs::write(
        &path,
        concat!(
            "{\"target\": 10, \"op\": \"-=\", \"operand\": 3}\n",
            "# comment\n",
            "{\"target\": \"x\", \"op\": \".=\", \"operand\": 1.0}\n",
        ),
    )
    .unwrap();

    letop()
        .arg("batch")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("1: 7"))
        .stdout(predicate::str::contains("3: error: E734: Wrong variable type for .="))
        .stderr(predicate::str::contains("1 of 2 batch lines failed"));
}

#[test]
fn batch_succeeds_when_all_lines_apply() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("ok.jsonl");
    std::fs::write(&path, "{\"target\": 1.5, \"op\": \"+=\", \"operand\": \"2\"}\n").unwrap();

    letop()
        .args(["--format", "json", "batch"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"line":1,"result":3.5}"#));
}

#[test]
fn missing_batch_file() {
    letop()
        .args(["batch", "does-not-exist.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error: failed to read"));
}
