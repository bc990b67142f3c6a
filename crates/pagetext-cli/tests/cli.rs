use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

use pagetext_core::pdf::fixture::build_pdf;

fn pagetext(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pagetext").unwrap();
    // Keep tests away from any real user config
    cmd.arg("--config").arg(config_dir.join("config.json"));
    cmd
}

fn write_sample(dir: &Path, pages: &[&str]) -> PathBuf {
    let path = dir.join("sample.pdf");
    fs::write(&path, build_pdf(pages)).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("pagetext")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("pages"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    pagetext(dir.path())
        .args(["stats", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_non_pdf_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pdf");
    fs::write(&path, "plain text, not a PDF").unwrap();

    pagetext(dir.path())
        .arg("stats")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse PDF"));
}

#[test]
fn test_extract_writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path(), &["First page", "Second page"]);
    let out_dir = dir.path().join("out");

    pagetext(dir.path())
        .arg("extract")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Pages: 2"));

    let text = fs::read_to_string(out_dir.join("sample.pdf_extracted.txt")).unwrap();
    assert!(text.starts_with("\n--- Page 1 ---\n"));
    assert!(text.contains("\n--- Page 2 ---\n"));
    assert!(text.contains("Second page"));
}

#[test]
fn test_extract_stdout_matches_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path(), &["Alpha beta", "Gamma"]);
    let out = dir.path().join("full.txt");

    pagetext(dir.path())
        .arg("extract")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let printed = pagetext(dir.path())
        .arg("extract")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(printed, fs::read(&out).unwrap());
}

#[test]
fn test_pages_default_selection() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path(), &["p one", "p two", "p three", "p four", "p five"]);

    pagetext(dir.path())
        .arg("pages")
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pages 1-3 of 5"));

    let text = fs::read_to_string(dir.path().join("sample.pdf_pages_1-3.txt")).unwrap();
    assert_eq!(text.matches("--- Page ").count(), 3);
    assert!(!text.contains("--- Page 4 ---"));
}

#[test]
fn test_pages_range_is_suffix_of_full_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path(), &["one", "two", "three"]);

    let full = pagetext(dir.path())
        .arg("extract")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let tail = pagetext(dir.path())
        .args(["pages", "--start", "2", "--end", "3", "--stdout"])
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert!(full.ends_with(&tail));
    assert!(String::from_utf8(tail).unwrap().starts_with("\n--- Page 2 ---\n"));
}

#[test]
fn test_pages_rejects_bad_range() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path(), &["one", "two"]);

    pagetext(dir.path())
        .args(["pages", "--start", "2", "--end", "5", "--stdout"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid page range 2-5"));
}

#[test]
fn test_stats_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path(), &["one two", "three"]);

    let output = pagetext(dir.path())
        .args(["stats", "--format", "json"])
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["file_name"], "sample.pdf");
    assert_eq!(json["stats"]["page_count"], 2);
    assert!(json.get("pages").is_none());
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();

    pagetext(dir.path())
        .args(["config", "set", "server.port", "9100"])
        .assert()
        .success();

    pagetext(dir.path())
        .args(["config", "get", "server.port"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9100"));

    pagetext(dir.path())
        .args(["config", "set", "server.nope", "1"])
        .assert()
        .failure();
}
