use std::io::Write;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_phrasecount");

fn phrasecount(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.current_dir(dir.path())
        .env_remove("PHRASECOUNT_TOP")
        .env_remove("PHRASECOUNT_CHUNK_SIZE")
        .env_remove("PHRASECOUNT_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn reports_phrases_from_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "I love sandwiches. I LOVE SANDWICHES").unwrap();

    let output = phrasecount(&dir)
        .args(["a.txt", "--no-stdin", "--chunk-size", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("The 3 most common 3 word phrases are:\n"));
    assert!(text.contains("i love sandwiches - 2\n"));
    assert!(text.contains("sandwiches i love - 1\n"));
}

#[test]
fn missing_file_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.txt"), "Shouldn't becomes shouldnt").unwrap();

    let output = phrasecount(&dir)
        .args(["nope.txt", "b.txt", "--no-stdin"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("No file found: nope.txt does not exist!"));
    assert!(text.contains("shouldnt becomes shouldnt - 1"));
}

#[test]
fn no_sources_message() {
    let dir = tempfile::tempdir().unwrap();
    let output = phrasecount(&dir).arg("--no-stdin").output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("No files provided!"));
}

#[test]
fn reads_piped_stdin_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = phrasecount(&dir)
        .args(["--format", "json", "--top", "1"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all("to be or not to be".as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let phrases = value["phrases"].as_array().unwrap();
    assert_eq!(phrases.len(), 1);
    assert_eq!(phrases[0]["phrase"], "be or not");
    assert_eq!(phrases[0]["count"], 1);
}
