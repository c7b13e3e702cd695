//! Tauri commands module.

pub mod browser;
pub mod library;
