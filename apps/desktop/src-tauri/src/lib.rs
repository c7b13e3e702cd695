// Deny unused code to catch dead code early (like knip for TS)
#![deny(unused)]
// Warn on unused dependencies to catch platform-specific cfg mismatches
#![warn(unused_crate_dependencies)]
// Warn on redundant path prefixes (e.g., std::path::Path when Path is imported)
#![warn(unused_qualifications)]
// Use log::* macros instead of println!/eprintln! for proper log level control
#![deny(clippy::print_stdout, clippy::print_stderr)]

//noinspection RsUnusedImport
// mimalloc is the binary's global allocator (see main.rs)
use mimalloc as _;

mod commands;
mod folder_browser;
mod ignore_poison;
mod library;
mod path_index;
mod settings;

use log::info;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            // Initialize logging - respects RUST_LOG env var (default: info)
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .format_timestamp_millis()
                .init();

            // Load the persisted library so the directory filter is
            // browsable without a rescan
            let db_path = app.path().app_data_dir()?.join("library.db");
            library::init(&db_path);

            // Seed the folder picker's view mode from persisted settings
            let saved_settings = settings::load_settings(app.handle());
            commands::browser::init_view_mode(saved_settings.default_view_mode);
            info!(
                "Startup complete (view mode: {:?})",
                saved_settings.default_view_mode
            );

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::library::get_library_paths,
            commands::library::add_library_path,
            commands::library::rescan_library_path,
            commands::library::remove_library_path,
            commands::library::get_directory_roots,
            commands::library::get_directory_children,
            commands::library::get_breadcrumbs,
            commands::library::play_video,
            commands::browser::open_folder_browser,
            commands::browser::close_folder_browser,
            commands::browser::browse_to,
            commands::browser::browser_back,
            commands::browser::browser_forward,
            commands::browser::browser_up,
            commands::browser::browser_refresh,
            commands::browser::set_browser_view_mode,
            commands::browser::get_browser_state
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
