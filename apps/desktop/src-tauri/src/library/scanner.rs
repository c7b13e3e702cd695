//! Filesystem scan for video-containing directories.

use std::collections::BTreeSet;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

/// Video container formats the library recognizes, by extension.
pub const SUPPORTED_FORMATS: [&str; 5] = ["mp4", "mkv", "avi", "mov", "flv"];

fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_ascii_lowercase();
            SUPPORTED_FORMATS.iter().any(|fmt| *fmt == lower)
        })
}

/// Recursively walks `root` and returns the distinct directories that
/// directly contain at least one video file, as absolute path strings in
/// sorted order.
///
/// Unreadable entries are skipped, not fatal: a permission error halfway
/// down one subtree must not lose the rest of the scan.
pub fn scan_video_directories(root: &Path) -> Vec<String> {
    let mut directories = BTreeSet::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Skipping unreadable entry under {:?}: {}", root, err);
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_video_file(entry.path()) {
            continue;
        }
        if let Some(parent) = entry.path().parent() {
            directories.insert(parent.to_string_lossy().to_string());
        }
    }

    directories.into_iter().collect()
}
