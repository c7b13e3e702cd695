//! Tauri commands for the video library.

use tauri_plugin_opener::OpenerExt;

use crate::library::{self, LibraryPath};
use crate::path_index::{BreadcrumbTrail, DirEntry};

/// Returns the scan roots currently in the library.
#[tauri::command]
pub fn get_library_paths() -> Vec<LibraryPath> {
    library::list_paths()
}

/// Adds a directory to the library and scans it for videos.
/// Returns the updated root list.
///
/// The scan walks the whole subtree, so it runs on a blocking worker
/// thread rather than the async runtime.
#[tauri::command]
pub async fn add_library_path(path: String) -> Result<Vec<LibraryPath>, String> {
    tokio::task::spawn_blocking(move || library::add_path(&path))
        .await
        .map_err(|e| format!("Task failed: {}", e))?
        .map_err(|e| e.to_string())
}

/// Rescans one existing library root.
#[tauri::command]
pub async fn rescan_library_path(path: String) -> Result<Vec<LibraryPath>, String> {
    tokio::task::spawn_blocking(move || library::rescan_path(&path))
        .await
        .map_err(|e| format!("Task failed: {}", e))?
        .map_err(|e| e.to_string())
}

/// Removes a root (and its scanned directories) from the library.
#[tauri::command]
pub async fn remove_library_path(path: String) -> Result<Vec<LibraryPath>, String> {
    tokio::task::spawn_blocking(move || library::remove_path(&path))
        .await
        .map_err(|e| format!("Task failed: {}", e))?
        .map_err(|e| e.to_string())
}

/// Top-level entries of the scanned library, for the directory filter.
#[tauri::command]
pub fn get_directory_roots() -> Vec<DirEntry> {
    library::root_entries()
}

/// Immediate children of `path` in the scanned library.
#[tauri::command]
pub fn get_directory_children(path: String) -> Vec<DirEntry> {
    library::child_entries(&path)
}

/// Breadcrumb trail for the current directory filter selection.
#[tauri::command]
pub fn get_breadcrumbs(current_path: String) -> BreadcrumbTrail {
    library::breadcrumbs(&current_path)
}

/// Opens a video file in the system's default player.
#[tauri::command]
pub fn play_video(app: tauri::AppHandle, path: String) -> Result<(), String> {
    let expanded = library::expand_tilde(&path);
    if !std::path::Path::new(&expanded).is_file() {
        return Err(format!("Video not found: {}", expanded));
    }
    app.opener()
        .open_path(&expanded, None::<&str>)
        .map_err(|e| format!("Failed to open {}: {}", expanded, e))
}
