//! Integration tests for the glossa CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn glossa() -> Command {
    Command::cargo_bin("glossa").unwrap()
}

#[test]
fn test_process_english_text() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(
        &dir,
        "english.txt",
        "Dr. Smith went to the store. He bought some milk and eggs.",
    );

    glossa()
        .args(["process", "-q", "-l", "en", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout("1\tDr. Smith went to the store.\n2\tHe bought some milk and eggs.\n");
}

#[test]
fn test_process_chinese_text() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "chinese.txt", "我喜欢学习编程。你呢？");

    glossa()
        .args(["process", "-q", "-l", "zh", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("1\t我喜欢学习编程。"))
        .stdout(predicate::str::contains("2\t你呢？"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "lesson.txt", "I eat an apple. She runs fast.");

    let output = glossa()
        .args(["process", "-q", "-l", "en", "-f", "json", "--text-id", "5", "-i"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let document = &value.as_array().unwrap()[0];
    assert_eq!(document["text_id"], 5);
    assert_eq!(document["title"], "lesson");
    assert_eq!(document["language_code"], "en");
    assert_eq!(document["total_sentences"], 2);
    assert_eq!(document["sentences"][1]["body"], "She runs fast.");
    assert!(document["sentences"][0]["grammar_annotations"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn test_markdown_output_with_vocabulary() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "pets.txt", "The cat sat on the mats.");
    let words = write_fixture(&dir, "known.txt", "# known words\nthe\ncat\nsat\n");
    let lemmas = write_fixture(&dir, "lemmas.tsv", "mats\tmat\n");

    glossa()
        .args(["process", "-q", "-l", "en", "-f", "markdown", "--title", "Pets", "-i"])
        .arg(&input)
        .arg("--known-words")
        .arg(&words)
        .arg("--lemmas")
        .arg(&lemmas)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Pets"))
        .stdout(predicate::str::contains("1. The cat sat on the mats."))
        .stdout(predicate::str::contains("| 1 | on | 1 |"))
        .stdout(predicate::str::contains("| 2 | mat | 1 |"))
        .stdout(predicate::str::contains("*Total sentences: 1*"));
}

#[test]
fn test_glob_assigns_consecutive_text_ids() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "a.txt", "First file.");
    write_fixture(&dir, "b.txt", "Second file.");
    let pattern = dir.path().join("*.txt");

    let output = glossa()
        .args(["process", "-q", "-f", "json", "--text-id", "10", "-i"])
        .arg(pattern.to_str().unwrap())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let documents = value.as_array().unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["text_id"], 10);
    assert_eq!(documents[0]["title"], "a");
    assert_eq!(documents[1]["text_id"], 11);
    assert_eq!(documents[1]["title"], "b");
}

#[test]
fn test_output_file_and_config() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "notes.txt", "Line one\n\nLine two");
    let config = write_fixture(
        &dir,
        "glossa.toml",
        "[processing]\ndefault_language = \"en\"\nsplit_on_blank_lines = true\n\n[output]\ndefault_format = \"markdown\"\n",
    );
    let out = dir.path().join("out.md");

    glossa()
        .args(["process", "-q", "-i"])
        .arg(&input)
        .arg("-c")
        .arg(&config)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("1. Line one"));
    assert!(written.contains("2. Line two"));
}

#[test]
fn test_external_language_profile() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "tlh.txt", "Qo. nuq Hab!");
    let profile = write_fixture(
        &dir,
        "klingon.toml",
        r#"
[metadata]
code = "tlh"
name = "Klingon"
category = "whitespace"

[terminators]
chars = ["!"]
"#,
    );

    glossa()
        .args(["process", "-q", "-i"])
        .arg(&input)
        .arg("--language-config")
        .arg(&profile)
        .assert()
        .success()
        .stdout("1\tQo. nuq Hab!\n");
}

#[test]
fn test_unknown_language_uses_generic_rules() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "k.txt", "Qapla' batlh. Heghlu'meH QaQ jajvam!");

    glossa()
        .args(["process", "-q", "-l", "Klingon", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("1\tQapla' batlh."))
        .stdout(predicate::str::contains("2\tHeghlu'meH QaQ jajvam!"));
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.txt");

    glossa()
        .args(["process", "-q", "-i"])
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found matching"));
}

#[test]
fn test_missing_word_list_is_config_error() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "a.txt", "Hello.");

    glossa()
        .args(["process", "-q", "-i"])
        .arg(&input)
        .arg("--known-words")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_list_languages() {
    glossa()
        .args(["list", "languages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en"))
        .stdout(predicate::str::contains("zh"))
        .stdout(predicate::str::contains("non_whitespace"));
}

#[test]
fn test_list_formats() {
    glossa()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_requires_input() {
    glossa().arg("process").assert().failure();
}
