use assert_fs::prelude::*;
use predicates::prelude::*;
use provision_fs::{NormalizedPath, io};

#[test]
fn test_write_text_creates_parent_directories() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join(".vscode/settings.json");

    io::write_text(&path, "{}\n").unwrap();

    temp.child(".vscode/settings.json").assert("{}\n");
}

#[test]
fn test_write_text_overwrites_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let child = temp.child("launch.json");
    child.write_str("stale content that is longer").unwrap();

    io::write_text(&NormalizedPath::new(child.path()), "fresh").unwrap();

    child.assert("fresh");
}

#[test]
fn test_read_text_roundtrip_utf8() {
    let temp = assert_fs::TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("notes.txt");

    io::write_text(&path, "Übersetzung ✓").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "Übersetzung ✓");
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    let err = io::read_text(&path).unwrap_err();
    assert!(err.to_string().contains("file.txt"));
}

#[test]
fn test_remove_dir_all_deletes_tree() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("venv/bin/python").write_str("fake").unwrap();

    io::remove_dir_all(&NormalizedPath::new(temp.path()).join("venv")).unwrap();

    temp.child("venv").assert(predicate::path::missing());
}
