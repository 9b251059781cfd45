use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn mdchunk_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mdchunk"))
}

fn setup_test_env(chunking: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let files_dir = root.join("vault");
    fs::create_dir_all(&files_dir).unwrap();
    fs::write(
        files_dir.join("alpha.md"),
        "---\ntitle: Alpha\n---\n# Alpha\n\nThe alpha note about Rust.\n\n## Cargo\n\nCrates and workspaces.",
    )
    .unwrap();
    fs::write(
        files_dir.join("long.md"),
        format!("# Long\n\n{}", "lorem ipsum dolor sit amet ".repeat(40)),
    )
    .unwrap();

    let config_path = root.join("mdchunk.toml");
    fs::write(&config_path, chunking).unwrap();

    (tmp, config_path)
}

fn run_mdchunk(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = mdchunk_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run mdchunk binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

const CHAR_CONFIG: &str = "[chunking]\ntokenizer = \"char\"\nmax_tokens = 200\noverlap_tokens = 40\n";

#[test]
fn test_chunk_summary() {
    let (tmp, config_path) = setup_test_env(CHAR_CONFIG);
    let file = tmp.path().join("vault/alpha.md");

    let (stdout, stderr, success) = run_mdchunk(&config_path, &["chunk", file.to_str().unwrap()]);
    assert!(success, "chunk failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Created 2 chunks"));
    assert!(stdout.contains("Heading: Alpha"));
    assert!(stdout.contains("Heading: Cargo"));
    assert!(stdout.contains("complete_section"));
    assert!(!stdout.contains("title: Alpha"));
}

#[test]
fn test_chunk_json_partial_sections() {
    let (tmp, config_path) = setup_test_env(CHAR_CONFIG);
    let file = tmp.path().join("vault/long.md");

    let (stdout, stderr, success) = run_mdchunk(
        &config_path,
        &["chunk", file.to_str().unwrap(), "--json", "--id", "long.md", "--contextualize"],
    );
    assert!(success, "chunk --json failed: stderr={}", stderr);

    let chunks: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert!(chunks.len() > 1);
    let total = chunks.len() as u64;
    for (i, c) in chunks.iter().enumerate() {
        assert_eq!(c["file_identifier"], "long.md");
        assert_eq!(c["chunk_index"], i as u64);
        assert_eq!(c["metadata"]["section_type"], "partial_section");
        assert_eq!(c["metadata"]["part"], i as u64 + 1);
        assert_eq!(c["metadata"]["total_parts"], total);
        assert!(c["token_count"].as_u64().unwrap() <= 200);
        assert!(c["contextualized_text"].as_str().unwrap().starts_with("# Long"));
    }
}

#[test]
fn test_sections_outline() {
    let (tmp, config_path) = setup_test_env(CHAR_CONFIG);
    let file = tmp.path().join("vault/long.md");

    let (stdout, _, success) = run_mdchunk(&config_path, &["sections", file.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("# Long"));
    assert!(stdout.contains("[split]"));
}

#[test]
fn test_stats_skips_missing_file() {
    let (tmp, config_path) = setup_test_env(CHAR_CONFIG);
    let alpha = tmp.path().join("vault/alpha.md");
    let long = tmp.path().join("vault/long.md");
    let missing = tmp.path().join("vault/missing.md");

    let (stdout, stderr, success) = run_mdchunk(
        &config_path,
        &[
            "stats",
            alpha.to_str().unwrap(),
            long.to_str().unwrap(),
            missing.to_str().unwrap(),
        ],
    );
    assert!(success, "stats failed: stderr={}", stderr);
    assert!(stdout.contains("Documents:   2"));
    assert!(stdout.contains("Skipped:     1"));
    assert!(stdout.contains("Avg tokens/chunk"));
    assert!(stderr.contains("missing.md"));
}

#[test]
fn test_overlap_equal_to_max_rejected() {
    let (tmp, config_path) =
        setup_test_env("[chunking]\ntokenizer = \"char\"\nmax_tokens = 100\noverlap_tokens = 100\n");
    let file = tmp.path().join("vault/alpha.md");

    let (stdout, stderr, success) = run_mdchunk(&config_path, &["chunk", file.to_str().unwrap()]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("overlap_tokens"));
}

#[test]
fn test_default_tokenizer() {
    let (tmp, config_path) = setup_test_env("");
    let file = tmp.path().join("vault/alpha.md");

    let (stdout, stderr, success) =
        run_mdchunk(&config_path, &["chunk", file.to_str().unwrap(), "--json"]);
    assert!(success, "chunk failed: stderr={}", stderr);
    let chunks: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0]["metadata"]["heading"], "Alpha");
    assert_eq!(chunks[1]["metadata"]["heading_level"], 2);
}
