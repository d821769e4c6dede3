use assert_cmd::Command as AssertCommand;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper struct to manage a pair of test files
struct TestFixture {
    temp_dir: TempDir,
    config_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        TestFixture {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            config_dir: TempDir::new().expect("Failed to create config directory"),
        }
    }

    /// Write a file into the fixture directory
    fn write<P: AsRef<Path>>(&self, name: P, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.temp_dir.path().join(name.as_ref());
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Run the CLI with config lookups isolated to the fixture
    fn run(&self, args: &[&str]) -> std::process::Output {
        let exe = env!("CARGO_BIN_EXE_sidediff_cli");
        let config = self.config_dir.path();
        Command::new(exe)
            .args(args)
            .env("XDG_CONFIG_HOME", config)
            .env("APPDATA", config)
            .env("HOME", config)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute command")
    }

    fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            eprintln!("STDOUT:\n{}", String::from_utf8_lossy(&output.stdout));
            eprintln!("STDERR:\n{}", String::from_utf8_lossy(&output.stderr));
            panic!("Command failed with status: {}", output.status);
        }
        String::from_utf8(output.stdout).expect("stdout not utf-8")
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut full = args.to_vec();
        full.push("--json");
        let stdout = self.run_success(&full);
        serde_json::from_str(&stdout).expect("invalid json output")
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("non-utf8 path")
}

#[test]
fn test_identical_files() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "a\nb\nc\n");
    let right = fixture.write("right.txt", "a\nb\nc\n");

    let stdout = fixture.run_success(&["diff", path_str(&left), path_str(&right), "--no-color"]);

    assert!(stdout.contains("Summary:"));
    assert!(stdout.contains("Unchanged:       3"));
    assert!(stdout.contains("Differences:     0"));
}

#[test]
fn test_modified_line_json() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "a\nb");
    let right = fixture.write("right.txt", "a\nc");

    let report = fixture.run_json(&["diff", path_str(&left), path_str(&right)]);

    assert_eq!(report["diff_count"], 1);
    assert_eq!(report["algorithm"], "myers");
    let chunks = report["chunks"].as_array().unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0]["kind"], "context");
    assert_eq!(chunks[1]["kind"], "modified");
    assert_eq!(chunks[1]["left_text"], "b");
    assert_eq!(chunks[1]["right_text"], "c");
    assert_eq!(chunks[1]["left_line_number"], 2);
    assert_eq!(chunks[1]["right_line_number"], 2);
}

#[test]
fn test_added_line_json() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "a");
    let right = fixture.write("right.txt", "a\nb");

    let report = fixture.run_json(&["diff", path_str(&left), path_str(&right)]);

    let added = &report["chunks"][1];
    assert_eq!(added["kind"], "added");
    assert_eq!(added["right_line_number"], 2);
    assert!(added["left_line_number"].is_null());
    assert_eq!(report["summary"]["added"], 1);
}

#[test]
fn test_word_level_segments_json() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "hello world\n");
    let right = fixture.write("right.txt", "hello mars\n");

    let report = fixture.run_json(&["diff", path_str(&left), path_str(&right)]);

    let chunk = &report["chunks"][0];
    assert_eq!(chunk["left_segments"][0]["text"], "hello ");
    assert_eq!(chunk["left_segments"][0]["kind"], "context");
    assert_eq!(chunk["left_segments"][1]["text"], "world");
    assert_eq!(chunk["left_segments"][1]["kind"], "removed");
    assert_eq!(chunk["right_segments"][1]["text"], "mars");
    assert_eq!(chunk["right_segments"][1]["kind"], "added");
}

#[test]
fn test_search_does_not_change_diff_count() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "find me here\n");
    let right = fixture.write("right.txt", "find me here\n");

    let report = fixture.run_json(&["diff", path_str(&left), path_str(&right), "--search", "ME"]);

    assert_eq!(report["diff_count"], 0);
    assert_eq!(report["summary"]["search_hits"], 1);
    let chunk = &report["chunks"][0];
    assert_eq!(chunk["kind"], "modified");
    assert_eq!(chunk["search_hit"], true);
    assert_eq!(chunk["left_segments"][0]["kind"], "modified");
    assert_eq!(chunk["left_segments"][0]["text"], "find me here");
}

#[test]
fn test_diff_only_hides_context() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "keep\nold\n");
    let right = fixture.write("right.txt", "keep\nnew\n");

    let stdout = fixture.run_success(&[
        "diff",
        path_str(&left),
        path_str(&right),
        "--diff-only",
        "--no-color",
    ]);

    assert!(!stdout.contains("| keep"));
    assert!(stdout.contains("| old"));
    assert!(stdout.contains("| new"));
    // Summary still counts the hidden context line
    assert!(stdout.contains("Unchanged:       1"));
}

#[test]
fn test_columns_output() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "The quick brown fox\n");
    let right = fixture.write("right.txt", "The quick red fox\n");

    let stdout = fixture.run_success(&[
        "diff",
        path_str(&left),
        path_str(&right),
        "--columns",
        "--width",
        "12",
        "--no-color",
    ]);

    assert!(stdout.contains("Left"));
    assert!(stdout.contains("Right"));
    assert!(stdout.contains("The quick..."));
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn test_crlf_normalized_by_default() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "one\r\ntwo\r\n");
    let right = fixture.write("right.txt", "one\ntwo\n");

    let report = fixture.run_json(&["diff", path_str(&left), path_str(&right)]);
    assert_eq!(report["diff_count"], 0);

    let report = fixture.run_json(&[
        "diff",
        path_str(&left),
        path_str(&right),
        "--keep-line-endings",
    ]);
    assert_eq!(report["diff_count"], 2);
}

#[test]
fn test_utf16_file_is_decoded() {
    let fixture = TestFixture::new();
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "caf\u{e9}\n".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let left = fixture.write("left.txt", bytes);
    let right = fixture.write("right.txt", "caf\u{e9}\n");

    let report = fixture.run_json(&["diff", path_str(&left), path_str(&right)]);

    assert_eq!(report["diff_count"], 0);
    assert_eq!(report["left"]["encoding"], "UTF-16LE");
    assert_eq!(report["right"]["encoding"], "UTF-8");
}

#[test]
fn test_latin1_file_is_decoded() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", b"na\xEFve r\xE9sum\xE9 du caf\xE9\n".to_vec());
    let right = fixture.write("right.txt", "naïve résumé du café\n");

    let report = fixture.run_json(&["diff", path_str(&left), path_str(&right)]);

    assert_eq!(report["diff_count"], 0);
    assert_eq!(report["chunks"][0]["left_text"], "naïve résumé du café");
    assert_ne!(report["left"]["encoding"], "UTF-8");
}

#[test]
fn test_algorithm_flag() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "a\nb\nc\n");
    let right = fixture.write("right.txt", "a\nc\n");

    let report = fixture.run_json(&[
        "diff",
        path_str(&left),
        path_str(&right),
        "--algorithm",
        "patience",
    ]);

    assert_eq!(report["algorithm"], "patience");
    assert_eq!(report["chunks"][1]["kind"], "removed");
    assert_eq!(report["diff_count"], 1);
}

#[test]
fn test_config_file_sets_algorithm() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "x\n");
    let right = fixture.write("right.txt", "y\n");

    let stdout = fixture.run_success(&["config", "--init"]);
    assert!(stdout.contains("sidediff.toml"));
    assert!(stdout.contains("algorithm = \"myers\""));

    let config_path = stdout
        .lines()
        .find_map(|line| line.strip_prefix("Config file: "))
        .map(PathBuf::from)
        .expect("config path in output");
    fs::write(&config_path, "algorithm = \"lcs\"\n").expect("rewrite config");

    let report = fixture.run_json(&["diff", path_str(&left), path_str(&right)]);
    assert_eq!(report["algorithm"], "lcs");
}

#[test]
fn test_missing_file_fails() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "a\n");
    let missing = fixture.root().join("missing.txt");

    AssertCommand::cargo_bin("sidediff_cli")
        .expect("binary built")
        .args(["diff", path_str(&left), path_str(&missing)])
        .env("HOME", fixture.root())
        .env("XDG_CONFIG_HOME", fixture.root())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_directory_argument_fails() {
    let fixture = TestFixture::new();
    let left = fixture.write("left.txt", "a\n");

    let output = fixture.run(&["diff", path_str(&left), path_str(fixture.root())]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("directory"));
}
