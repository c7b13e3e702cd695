//! Folder browser — picking a new library path from live storage.
//!
//! The modal folder picker walks the real filesystem through a
//! [`FolderSource`], with back/forward/up history kept by
//! [`NavigationSession`]. This is deliberately separate from
//! `path_index`: the picker browses live storage, the index browses the
//! already-scanned library.

mod local;
mod session;

#[cfg(test)]
mod local_test;
#[cfg(test)]
mod session_test;

pub use local::LocalFolderSource;
pub use session::{NavigationRequest, NavigationSession, SessionSnapshot, ViewMode};

use serde::{Deserialize, Serialize};

/// A single entry in a live folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderItem {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
}

/// A live listing for one folder. `current_path` is the path the source
/// actually listed, which can differ from what was asked for (listing `""`
/// on POSIX resolves to `/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderListing {
    pub current_path: String,
    pub items: Vec<FolderItem>,
}

/// Error type for live folder listings.
#[derive(Debug, Clone)]
pub enum BrowseError {
    /// Path does not exist
    NotFound(String),
    /// Path exists but is not a directory
    NotADirectory(String),
    /// Permission denied
    PermissionDenied(String),
    /// Generic I/O error
    Io(String),
}

impl std::fmt::Display for BrowseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Path not found: {}", path),
            Self::NotADirectory(path) => write!(f, "Not a directory: {}", path),
            Self::PermissionDenied(path) => write!(f, "Permission denied: {}", path),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for BrowseError {}

impl From<std::io::Error> for BrowseError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

/// Live directory-listing backend the navigation session browses through.
///
/// Implementations must be cheap to call repeatedly; the session issues a
/// fresh listing on every navigation, including refreshes, and never
/// caches results across calls.
pub trait FolderSource: Send + Sync {
    /// Lists the folders under `path`. `""` means the browse root: drive
    /// roots on Windows, `/` elsewhere.
    fn list_folder(&self, path: &str) -> Result<FolderListing, BrowseError>;
}
