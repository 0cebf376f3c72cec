//! Command-line tests running the `fustbon` binary on extracted receipt text.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ISSUE: &str = "\
BON UITGIFTE
70012345
Aalsmeer
5-mrt-24 14:30 uur
104711
Klantnummer
KlantnaamKwekerij De Zonnebloem
Transactienummer
Van der Berg Transport
520 Bloemendoos 19cm726
Deze bon is het bewijs van uitgifte.
";

const TRANSFER: &str = "\
FUSTBON
80012345
Kwekerij De Tuin
1001
Klantnummer van
Klantnummer naar
2002
FustcodeStuks
KlantnaamBloemen BV
520 Bloemendoos 19cm2.500
";

fn fustbon() -> Command {
    Command::cargo_bin("fustbon").unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Default config file inside `dir`, so tests never read the user's
/// configuration.
fn config_arg(dir: &Path) -> String {
    write(dir, "config.json", "{}").display().to_string()
}

#[test]
fn process_prints_json() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "issue.txt", ISSUE);

    fustbon()
        .args(["--config", &config_arg(dir.path()), "process"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"document_type\": \"BON UITGIFTE\""))
        .stdout(predicate::str::contains("\"transaction_number\": \"70012345\""))
        .stdout(predicate::str::contains("\"carrier\": \"Van der Berg Transport\""))
        .stdout(predicate::str::contains("raw_text").not());
}

#[test]
fn process_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "transfer.txt", TRANSFER);
    let output = dir.path().join("transfer.csv");

    fustbon()
        .args(["--config", &config_arg(dir.path()), "process", "-f", "csv", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.contains("80012345,FUSTBON Overboeking,1001,Kwekerij De Tuin,2002,Bloemen BV"));
}

#[test]
fn process_item_rows() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "issue.txt", ISSUE);

    fustbon()
        .args(["--config", &config_arg(dir.path()), "process", "-f", "csv", "--items"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("70012345,520,Bloemendoos 19cm,726"));
}

#[test]
fn process_text_summary() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "transfer.txt", TRANSFER);

    fustbon()
        .args(["--config", &config_arg(dir.path()), "process", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("FUSTBON Overboeking: 80012345"))
        .stdout(predicate::str::contains("From: 1001 Kwekerij De Tuin"))
        .stdout(predicate::str::contains("To: 2002 Bloemen BV"))
        .stdout(predicate::str::contains("2.500"));
}

#[test]
fn process_validate_reports_missing_items() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "empty.txt", "BON INNAME\n70012399\nRijnsburg\n");

    fustbon()
        .args(["--config", &config_arg(dir.path()), "process", "--validate"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("No fust items found"));
}

#[test]
fn process_rejects_unclassifiable_receipt() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "pakbon.txt", "Pakbon\n12345\n520 Doos12\n");

    fustbon()
        .args(["--config", &config_arg(dir.path()), "process"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown document type"));
}

#[test]
fn process_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "issue.png", ISSUE);

    fustbon()
        .args(["--config", &config_arg(dir.path()), "process"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn classify_prints_document_type() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "transfer.txt", TRANSFER);

    fustbon()
        .args(["--config", &config_arg(dir.path()), "classify"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::diff("FUSTBON Overboeking\n"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    fs::create_dir(&input_dir).unwrap();

    write(&input_dir, "a_issue.txt", ISSUE);
    write(&input_dir, "b_transfer.txt", TRANSFER);
    write(&input_dir, "c_duplicate.txt", ISSUE);
    write(&input_dir, "d_pakbon.txt", "Pakbon\n12345\n");
    write(&input_dir, "notes.md", ISSUE);

    let pattern = input_dir.join("*").display().to_string();

    fustbon()
        .args(["--config", &config_arg(dir.path()), "batch", &pattern, "-j", "2", "--summary"])
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 4 files to process"))
        .stdout(predicate::str::contains("Duplicate transaction number 70012345"));

    assert!(output_dir.join("a_issue.json").exists());
    assert!(output_dir.join("b_transfer.json").exists());
    assert!(!output_dir.join("c_duplicate.json").exists());

    let summary = fs::read_to_string(output_dir.join("summary.csv")).unwrap();
    let lines: Vec<_> = summary.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("a_issue.txt,success,70012345,BON UITGIFTE"));
    assert!(lines[2].starts_with("b_transfer.txt,success,80012345"));
    assert!(lines[3].starts_with("c_duplicate.txt,error"));
    assert!(lines[4].starts_with("d_pakbon.txt,error"));
}

#[test]
fn batch_keeps_outputs_with_the_same_stem_apart() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    for sub in ["in/aalsmeer", "in/rijnsburg"] {
        fs::create_dir_all(dir.path().join(sub)).unwrap();
    }
    write(&dir.path().join("in/aalsmeer"), "bon.txt", ISSUE);
    write(&dir.path().join("in/rijnsburg"), "bon.txt", TRANSFER);

    let pattern = dir.path().join("in/**/*.txt").display().to_string();

    fustbon()
        .args(["--config", &config_arg(dir.path()), "batch", &pattern])
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success();

    let first = fs::read_to_string(output_dir.join("bon.json")).unwrap();
    let second = fs::read_to_string(output_dir.join("rijnsburg_bon.json")).unwrap();
    assert!(first.contains("70012345"));
    assert!(second.contains("80012345"));
}

#[test]
fn invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "issue.txt", ISSUE);
    let config = write(dir.path(), "config.json", "{not json");

    fustbon()
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn batch_fail_fast_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a_pakbon.txt", "Pakbon\n12345\n");
    write(dir.path(), "b_issue.txt", ISSUE);

    let pattern = dir.path().join("*.txt").display().to_string();

    fustbon()
        .args(["--config", &config_arg(dir.path()), "batch", &pattern, "--fail-fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "issue.txt", ISSUE);
    let config = dir.path().join("absent.json").display().to_string();

    fustbon()
        .args(["--config", &config, "process"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.pdf").display().to_string();

    fustbon()
        .args(["--config", &config_arg(dir.path()), "batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("fustbon").join("config.json");
    let config = config.display().to_string();

    fustbon()
        .args(["--config", &config, "config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("fustbon").join("config.json").exists());

    fustbon()
        .args(["--config", &config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fustbon()
        .args(["--config", &config, "config", "set", "batch.jobs", "8"])
        .assert()
        .success();

    fustbon()
        .args(["--config", &config, "config", "get", "batch.jobs"])
        .assert()
        .success()
        .stdout(predicate::str::diff("8\n"));

    fustbon()
        .args(["--config", &config, "config", "set", "batch.workers", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn config_enables_raw_text() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "config.json", r#"{"output": {"include_raw_text": true}}"#);
    let input = write(dir.path(), "issue.txt", ISSUE);

    fustbon()
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"raw_text\":"));
}
