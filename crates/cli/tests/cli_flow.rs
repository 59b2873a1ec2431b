use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn tidy(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tidy").expect("binary");
    cmd.current_dir(workdir)
        .env_remove("TIDY_CONFIG")
        .env_remove("TIDY_STORE_PATH")
        .env_remove("TIDY_EMBED_MODE")
        .env_remove("TIDY_EMBED_DIM")
        .arg("--quiet");
    cmd
}

fn run_json(workdir: &Path, args: &[&str]) -> Value {
    let output = tidy(workdir).args(args).output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn ids(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|r| r["id"].as_str().expect("id").to_string())
        .collect()
}

fn setup_library(root: &Path) {
    fs::write(
        root.join("library.json"),
        r#"[
            {"id": "a", "embedding": [1.0, 0.0]},
            {"id": "b", "embedding": [0.0, 1.0]},
            {"id": "c", "embedding": [1.0, 0.0]}
        ]"#,
    )
    .unwrap();
}

#[test]
fn index_then_search_by_vector() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_library(root);

    let index = run_json(root, &["index", "--input", "library.json"]);
    assert_eq!(index["status"], "ok");
    assert_eq!(index["stats"]["items"], 3);
    assert_eq!(index["dimension"], 2);
    assert!(root.join(".tidy/index.json").exists());

    let search = run_json(root, &["search", "--vector", "1,0"]);
    assert_eq!(search["state"], "queried");
    assert_eq!(ids(&search), vec!["a", "c", "b"]);
    assert_eq!(search["results"][0]["score"], 1.0);
    assert_eq!(search["results"][2]["score"], 0.0);
}

#[test]
fn list_is_newest_first_without_scores() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_library(root);
    run_json(root, &["index", "--input", "library.json"]);

    let list = run_json(root, &["list"]);
    assert_eq!(list["state"], "default");
    assert_eq!(ids(&list), vec!["c", "b", "a"]);
    assert!(list["results"][0].get("score").is_none());

    let limited = run_json(root, &["list", "--limit", "1"]);
    assert_eq!(ids(&limited), vec!["c"]);
    assert_eq!(limited["total"], 3);
}

#[test]
fn similar_ranks_around_an_item() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_library(root);
    run_json(root, &["index", "--input", "library.json"]);

    let similar = run_json(root, &["similar", "--id", "b"]);
    assert_eq!(ids(&similar), vec!["b", "a", "c"]);

    tidy(root)
        .args(["similar", "--id", "zzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item not found"));
}

#[test]
fn mismatched_query_dimension_fails() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_library(root);
    run_json(root, &["index", "--input", "library.json"]);

    tidy(root)
        .args(["search", "--vector", "1,0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 2, got 3"));
}

#[test]
fn text_search_uses_the_stub_embedder() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(
        root.join("notes.json"),
        r#"[
            {"id": "beach", "text": "sunset at the beach"},
            {"id": "forest", "text": "pine forest in winter"}
        ]"#,
    )
    .unwrap();

    run_json(
        root,
        &["--embed-dim", "32", "index", "--input", "notes.json"],
    );
    let search = run_json(
        root,
        &["--embed-dim", "32", "search", "--text", "pine forest in winter"],
    );
    assert_eq!(ids(&search)[0], "forest");
}

#[test]
fn empty_library_lists_nothing() {
    let temp = tempdir().unwrap();
    let root = temp.path();

    let list = run_json(root, &["list"]);
    assert_eq!(list["state"], "empty");
    assert_eq!(ids(&list), Vec::<String>::new());

    let search = run_json(root, &["search", "--vector", "1,0"]);
    assert_eq!(search["state"], "empty");
}

#[test]
fn config_file_sets_store_path() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_library(root);
    fs::write(root.join("tidy.toml"), "store_path = \"custom/store.json\"\n").unwrap();

    run_json(
        root,
        &["--config", "tidy.toml", "index", "--input", "library.json"],
    );
    assert!(root.join("custom/store.json").exists());
    assert!(!root.join(".tidy/index.json").exists());
}
