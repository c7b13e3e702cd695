//! Settings loading from the tauri-plugin-store JSON file.
//!
//! The frontend owns the settings UI and writes settings.json through
//! tauri-plugin-store; the backend only reads the file on startup to seed
//! initial state (the folder picker's default view mode).

use std::fs;
use std::path::PathBuf;

use tauri::Manager;

use crate::folder_browser::ViewMode;

/// Backend-relevant settings, with defaults for anything missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub default_view_mode: ViewMode,
}

/// Loads settings from the persistent store file (settings.json).
/// Returns defaults if the file doesn't exist or can't be parsed.
pub fn load_settings<R: tauri::Runtime>(app: &tauri::AppHandle<R>) -> Settings {
    let Ok(data_dir) = app.path().app_data_dir() else {
        return Settings::default();
    };

    let settings_path: PathBuf = data_dir.join("settings.json");
    let Ok(contents) = fs::read_to_string(&settings_path) else {
        return Settings::default();
    };
    let Ok(json) = serde_json::from_str::<serde_json::Value>(&contents) else {
        return Settings::default();
    };

    let default_view_mode = json
        .get("defaultViewMode")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    Settings { default_view_mode }
}
