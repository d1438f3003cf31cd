use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const INDICATION: &str = "Naam jongere: Jan de Vries
Leefgroep: De Branding
Sport                    X
Muziek
Indicatie afgegeven van - tot:
14-11-2025 - 01-12-2025
Leerdoelen: nvt
";

const REPORT: &str = "Aanwezig: 6
Sfeer: goed
Samenvatting: zaalvoetbal
Incidenten: geen
";

fn sportdash() -> Command {
    let home = std::env::temp_dir().join("sportdash-cli-tests");
    let mut cmd = Command::cargo_bin("sportdash").unwrap();
    cmd.env("XDG_CONFIG_HOME", &home).env("HOME", &home);
    cmd
}

#[test]
fn indication_from_stdin() {
    sportdash()
        .arg("indication")
        .write_stdin(INDICATION)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""subjectName":"Jan de Vries""#))
        .stdout(predicate::str::contains(r#""activityFlags":["Sport"]"#))
        .stdout(predicate::str::contains(r#""validFrom":"2025-11-14""#))
        .stdout(predicate::str::contains(r#""learningGoals":"N.v.t.""#));
}

#[test]
fn indication_from_file_as_text() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("jan.txt");
    fs::write(&input, INDICATION).unwrap();

    sportdash()
        .args(["indication", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Subject: Jan de Vries"))
        .stdout(predicate::str::contains("Valid: 2025-11-14 - 2025-12-01"));
}

#[test]
fn indication_validate_lists_notes() {
    sportdash()
        .args(["indication", "--validate"])
        .write_stdin("Leefgroep: Noord")
        .assert()
        .success()
        .stderr(predicate::str::contains("Missing subject name"));
}

#[test]
fn request_body_is_decoded() {
    sportdash()
        .args(["indication", "--request"])
        .write_stdin(r#"{"text": "Naam: Piet"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""subjectName":"Piet""#));
}

#[test]
fn request_without_text_is_rejected() {
    sportdash()
        .args(["report", "--request"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("status 400"));
}

#[test]
fn complete_report_needs_no_review() {
    sportdash()
        .arg("report")
        .write_stdin(REPORT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""confidenceScore":1.0"#))
        .stderr(predicate::str::contains("review").not());
}

#[test]
fn sparse_report_is_flagged() {
    sportdash()
        .arg("report")
        .write_stdin("Sfeer: onrustig")
        .assert()
        .success()
        .stderr(predicate::str::contains("review before saving"));
}

#[test]
fn dates_one_per_line() {
    sportdash()
        .args(["date", "3 januari 2025", "03-01-2025", "volgende week"])
        .assert()
        .success()
        .stdout("2025-01-03\n2025-01-03\nvolgende week\n");
}

#[test]
fn strict_dates_fail_on_unknown_text() {
    sportdash()
        .args(["date", "--strict", "volgende week"])
        .assert()
        .failure();
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("a.txt"), REPORT).unwrap();
    fs::write(input_dir.join("b.txt"), "Sfeer: rustig").unwrap();

    let pattern = format!("{}/*.txt", input_dir.display());
    sportdash()
        .args(["batch", &pattern, "--kind", "report", "--summary", "-j", "2"])
        .arg("-o")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    assert!(output_dir.join("a.json").exists());
    assert!(output_dir.join("b.json").exists());

    let summary = fs::read_to_string(output_dir.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("a.txt,success"));
    assert!(lines[2].starts_with("b.txt,success"));
    assert!(lines[2].contains(",yes,"));
}

#[test]
fn batch_keeps_outputs_with_the_same_file_name() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("out");
    for group in ["noord", "zuid"] {
        let group_dir = dir.path().join("in").join(group);
        fs::create_dir_all(&group_dir).unwrap();
        fs::write(group_dir.join("verslag.txt"), format!("Sfeer: {group}")).unwrap();
    }

    let pattern = format!("{}/in/*/*.txt", dir.path().display());
    sportdash()
        .args(["batch", &pattern, "--kind", "report"])
        .arg("-o")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    let first = fs::read_to_string(output_dir.join("verslag.json")).unwrap();
    let second = fs::read_to_string(output_dir.join("verslag-2.json")).unwrap();
    assert!(first.contains("noord"));
    assert!(second.contains("zuid"));
}

#[test]
fn batch_stops_on_bad_request_body() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.json"), "not json").unwrap();

    let pattern = format!("{}/*.json", dir.path().display());
    sportdash()
        .args(["batch", &pattern, "--request"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    sportdash()
        .args(["batch", &pattern, "--request", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 successful, 1 failed"));
}

#[test]
fn config_init_get_and_set() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    sportdash()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    sportdash()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "report.review_threshold", "0.5"])
        .assert()
        .success();

    sportdash()
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "report.review_threshold"])
        .assert()
        .success()
        .stdout("0.5\n");

    sportdash()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "report.review_threshold", "2"])
        .assert()
        .failure();
}

#[test]
fn missing_explicit_config_fails() {
    sportdash()
        .args(["--config", "/nonexistent/sportdash.json", "report"])
        .write_stdin(REPORT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}
