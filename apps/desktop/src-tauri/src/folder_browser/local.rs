//! Live filesystem folder source.

use std::path::Path;

use super::{BrowseError, FolderItem, FolderListing, FolderSource};

/// A folder source backed by the local filesystem.
///
/// Lists subdirectories only (the picker selects folders, not files) and
/// skips dotfiles. The browse root (`""`) maps to the platform's top
/// level: existing drive roots on Windows, `/` everywhere else.
#[derive(Debug, Default)]
pub struct LocalFolderSource;

impl LocalFolderSource {
    pub fn new() -> LocalFolderSource {
        LocalFolderSource
    }

    fn list_root(&self) -> Result<FolderListing, BrowseError> {
        #[cfg(windows)]
        {
            let items = ('A'..='Z')
                .map(|letter| format!("{letter}:\\"))
                .filter(|root| Path::new(root).exists())
                .map(|root| FolderItem {
                    name: root.clone(),
                    path: root,
                    is_directory: true,
                })
                .collect();
            Ok(FolderListing {
                current_path: String::new(),
                items,
            })
        }
        #[cfg(not(windows))]
        {
            self.list_directory("/")
        }
    }

    fn list_directory(&self, path: &str) -> Result<FolderListing, BrowseError> {
        let dir = Path::new(path);
        if !dir.exists() {
            return Err(BrowseError::NotFound(path.to_string()));
        }
        if !dir.is_dir() {
            return Err(BrowseError::NotADirectory(path.to_string()));
        }

        let mut items = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let item_path = entry.path();
            // Follows symlinks, like the picker's "is this openable" check
            if !item_path.is_dir() {
                continue;
            }
            items.push(FolderItem {
                path: item_path.to_string_lossy().to_string(),
                name,
                is_directory: true,
            });
        }
        items.sort_by(|a, b| crate::path_index::compare_names(&a.name, &b.name));

        Ok(FolderListing {
            current_path: path.to_string(),
            items,
        })
    }
}

impl FolderSource for LocalFolderSource {
    fn list_folder(&self, path: &str) -> Result<FolderListing, BrowseError> {
        if path.is_empty() {
            self.list_root()
        } else {
            self.list_directory(path)
        }
    }
}
