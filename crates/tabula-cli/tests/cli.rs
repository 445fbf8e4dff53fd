use std::fs;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::tempdir;

fn tabula() -> Command {
    Command::cargo_bin("tabula").expect("binary builds")
}

#[test]
fn schema_prints_the_record_schema() {
    let output = tabula().arg("schema").output().expect("command runs");
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let props = schema["properties"].as_object().expect("object schema");
    assert!(props.contains_key("shape"));
    assert!(props.contains_key("chair_armrest"));
}

#[test]
fn schema_rejects_an_out_of_range_step() {
    tabula().args(["schema", "--step", "9"]).assert().failure();
}

#[test]
fn step_schema_follows_the_shape_guard() {
    let output = tabula()
        .args(["schema", "--step", "1"])
        .output()
        .expect("command runs");
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let props = schema["properties"].as_object().expect("object schema");
    // Default record: shape unset, so the ratio stays hidden.
    assert!(props.contains_key("shape"));
    assert!(!props.contains_key("ratio"));
}

#[test]
fn validate_accepts_partial_answers() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("answers.json");
    fs::write(&path, r#"{ "name": "Li", "shape": "rect" }"#).expect("write answers");

    let output = tabula()
        .args(["validate", "--answers"])
        .arg(&path)
        .output()
        .expect("command runs");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OK: answers are well-formed"));
}

#[test]
fn validate_flags_a_malformed_due_date() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("answers.json");
    fs::write(&path, r#"{ "due_time": "soon" }"#).expect("write answers");

    let output = tabula()
        .args(["validate", "--answers"])
        .arg(&path)
        .output()
        .expect("command runs");
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("date_shape"));
}

#[test]
fn validate_reports_unknown_fields() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("answers.json");
    fs::write(&path, r#"{ "colour": "red" }"#).expect("write answers");

    let output = tabula()
        .args(["validate", "--answers"])
        .arg(&path)
        .output()
        .expect("command runs");
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unknown field: colour"));
}

#[test]
fn render_json_payload_exposes_the_ratio_for_rect_tables() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("answers.json");
    fs::write(&path, r#"{ "shape": "rect" }"#).expect("write answers");

    let output = tabula()
        .args(["render", "--step", "1", "--format", "json", "--answers"])
        .arg(&path)
        .output()
        .expect("command runs");
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let fields = payload["fields"].as_array().expect("fields array");
    let ratio = fields
        .iter()
        .find(|field| field["id"] == "ratio")
        .expect("ratio entry");
    assert_eq!(ratio["visible"], Value::Bool(true));
}

#[test]
fn summary_writes_an_order_sheet() {
    let dir = tempdir().expect("tempdir");
    let answers = dir.path().join("answers.json");
    fs::write(
        &answers,
        r#"{ "name": "Li", "shape": "rect", "ratio": "4:3", "wood": "zitan" }"#,
    )
    .expect("write answers");
    let sheet = dir.path().join("order.md");

    tabula()
        .args(["summary", "--answers"])
        .arg(&answers)
        .arg("--out")
        .arg(&sheet)
        .assert()
        .success();

    let rendered = fs::read_to_string(&sheet).expect("sheet written");
    assert!(rendered.contains("# Dining table order"));
    assert!(rendered.contains("Customer: Li"));
    assert!(rendered.contains("Wood: zitan"));
}

#[test]
fn scripted_wizard_run_reaches_submission() {
    // One line per prompt: two fields + nav for step 0, then onwards. The
    // shape answer reveals the ratio prompt within step 1.
    let transcript = "Li\n\n\nrect\n4:3\n6\n\n\n\n\n\n\n\n\n\nzitan\n\ny\n";

    let output = tabula()
        .args(["wizard", "--answers-json"])
        .write_stdin(transcript)
        .output()
        .expect("command runs");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Done"));
    assert!(stdout.contains("Order transcript (CBOR hex):"));
    assert!(stdout.contains("\"name\": \"Li\""));
    assert!(stdout.contains("\"ratio\": \"4:3\""));
    assert!(stdout.contains("\"wood\": \"zitan\""));
}

#[test]
fn wizard_quits_cleanly_on_eof() {
    let output = tabula()
        .arg("wizard")
        .write_stdin("")
        .output()
        .expect("command runs");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nothing was submitted"));
}
