//! Tauri commands for the folder picker.
//!
//! One global [`NavigationSession`] backs the picker modal. Commands take
//! the session lock only to issue a request or fold a result in; the
//! actual directory listing runs on a blocking worker thread with the
//! lock released, so a slow disk never blocks concurrent commands. The
//! session's epoch check makes the unlocked window safe: whichever
//! listing was requested last wins, regardless of completion order.

use std::sync::{LazyLock, Mutex};

use crate::folder_browser::{
    FolderSource, LocalFolderSource, NavigationRequest, NavigationSession, SessionSnapshot,
    ViewMode,
};
use crate::ignore_poison::IgnorePoison;

static SESSION: LazyLock<Mutex<NavigationSession>> =
    LazyLock::new(|| Mutex::new(NavigationSession::default()));

static SOURCE: LazyLock<LocalFolderSource> = LazyLock::new(LocalFolderSource::new);

/// Seeds the picker's view mode from persisted settings. Called once on
/// startup, before any browser command can run.
pub fn init_view_mode(mode: ViewMode) {
    let mut session = SESSION.lock_ignore_poison();
    *session = NavigationSession::new(mode);
}

/// Runs one listing request to completion and returns the resulting
/// session state.
async fn run_request(request: NavigationRequest) -> Result<SessionSnapshot, String> {
    let path = request.path.clone();
    let result = tokio::task::spawn_blocking(move || SOURCE.list_folder(&path))
        .await
        .map_err(|e| format!("Task failed: {}", e))?;

    let mut session = SESSION.lock_ignore_poison();
    session.apply(&request, result);
    Ok(session.snapshot())
}

/// Opens the folder picker at the browse root.
#[tauri::command]
pub async fn open_folder_browser() -> Result<SessionSnapshot, String> {
    let request = SESSION.lock_ignore_poison().open();
    run_request(request).await
}

/// Closes the folder picker and discards its state.
#[tauri::command]
pub fn close_folder_browser() {
    SESSION.lock_ignore_poison().close();
}

/// Navigates the picker to `path` (history-tracked).
#[tauri::command]
pub async fn browse_to(path: String) -> Result<SessionSnapshot, String> {
    let request = SESSION.lock_ignore_poison().navigate(&path);
    match request {
        Some(request) => run_request(request).await,
        None => Ok(SESSION.lock_ignore_poison().snapshot()),
    }
}

/// Steps back in the picker's history.
#[tauri::command]
pub async fn browser_back() -> Result<SessionSnapshot, String> {
    let request = SESSION.lock_ignore_poison().back();
    match request {
        Some(request) => run_request(request).await,
        None => Ok(SESSION.lock_ignore_poison().snapshot()),
    }
}

/// Steps forward in the picker's history.
#[tauri::command]
pub async fn browser_forward() -> Result<SessionSnapshot, String> {
    let request = SESSION.lock_ignore_poison().forward();
    match request {
        Some(request) => run_request(request).await,
        None => Ok(SESSION.lock_ignore_poison().snapshot()),
    }
}

/// Navigates to the parent of the picker's current folder.
#[tauri::command]
pub async fn browser_up() -> Result<SessionSnapshot, String> {
    let request = SESSION.lock_ignore_poison().up();
    match request {
        Some(request) => run_request(request).await,
        None => Ok(SESSION.lock_ignore_poison().snapshot()),
    }
}

/// Re-lists the picker's current folder.
#[tauri::command]
pub async fn browser_refresh() -> Result<SessionSnapshot, String> {
    let request = SESSION.lock_ignore_poison().refresh();
    match request {
        Some(request) => run_request(request).await,
        None => Ok(SESSION.lock_ignore_poison().snapshot()),
    }
}

/// Switches the picker between list and grid rendering. Re-lists the
/// current folder when the picker is open.
#[tauri::command]
pub async fn set_browser_view_mode(mode: ViewMode) -> Result<SessionSnapshot, String> {
    let request = SESSION.lock_ignore_poison().switch_view_mode(mode);
    match request {
        Some(request) => run_request(request).await,
        None => Ok(SESSION.lock_ignore_poison().snapshot()),
    }
}

/// Current picker state, for re-rendering without navigation.
#[tauri::command]
pub fn get_browser_state() -> SessionSnapshot {
    SESSION.lock_ignore_poison().snapshot()
}
