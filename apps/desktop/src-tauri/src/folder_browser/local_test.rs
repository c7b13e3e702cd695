//! Tests for the local filesystem folder source.

use std::fs;

use super::local::LocalFolderSource;
use super::{BrowseError, FolderSource};

#[test]
fn lists_subdirectories_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("Movies")).unwrap();
    fs::create_dir(dir.path().join("Shows")).unwrap();
    fs::write(dir.path().join("stray.mp4"), b"").unwrap();

    let listing = LocalFolderSource::new()
        .list_folder(dir.path().to_str().unwrap())
        .unwrap();
    let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Movies", "Shows"]);
    assert!(listing.items.iter().all(|i| i.is_directory));
}

#[test]
fn skips_dotfiles() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join(".hidden")).unwrap();
    fs::create_dir(dir.path().join("visible")).unwrap();

    let listing = LocalFolderSource::new()
        .list_folder(dir.path().to_str().unwrap())
        .unwrap();
    let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["visible"]);
}

#[test]
fn sorts_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["banana", "Apple", "cherry"] {
        fs::create_dir(dir.path().join(name)).unwrap();
    }

    let listing = LocalFolderSource::new()
        .list_folder(dir.path().to_str().unwrap())
        .unwrap();
    let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Apple", "banana", "cherry"]);
}

#[test]
fn listing_echoes_requested_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_str().unwrap();

    let listing = LocalFolderSource::new().list_folder(path).unwrap();
    assert_eq!(listing.current_path, path);
}

#[test]
fn item_paths_join_parent_and_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let listing = LocalFolderSource::new()
        .list_folder(dir.path().to_str().unwrap())
        .unwrap();
    assert_eq!(
        listing.items[0].path,
        dir.path().join("sub").to_string_lossy()
    );
}

#[test]
fn missing_path_is_not_found() {
    let result = LocalFolderSource::new().list_folder("/definitely/not/here");
    assert!(matches!(result, Err(BrowseError::NotFound(_))));
}

#[test]
fn file_path_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"x").unwrap();

    let result = LocalFolderSource::new().list_folder(file.to_str().unwrap());
    assert!(matches!(result, Err(BrowseError::NotADirectory(_))));
}

#[cfg(unix)]
#[test]
fn browse_root_resolves_to_slash() {
    let listing = LocalFolderSource::new().list_folder("").unwrap();
    assert_eq!(listing.current_path, "/");
    assert!(!listing.items.is_empty());
}
