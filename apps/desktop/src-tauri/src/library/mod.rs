//! The scanned video library.
//!
//! The user registers scan roots (library paths); each root is walked for
//! directories that directly contain video files, and those directories
//! feed the [`DirectoryIndex`](crate::path_index::DirectoryIndex) the
//! browse UI navigates. Roots and scan results persist in SQLite so the
//! library is browsable immediately on the next launch.
//!
//! All state lives behind one module-level `Mutex`: the SQLite connection
//! is `Send` but not `Sync`, and every operation here is a short
//! read-modify-write anyway. Scans happen on blocking worker threads via
//! the command layer; the lock is only taken to fold results in.

mod scanner;
mod store;


pub use scanner::scan_video_directories;
pub use store::{LibraryStore, LibraryStoreError};

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex};

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::ignore_poison::IgnorePoison;
use crate::path_index::{BreadcrumbTrail, DirEntry, DirectoryIndex, is_under};

/// One scan root the user added to the library.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPath {
    pub directory_path: String,
    pub last_scanned: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Error type for library operations.
#[derive(Debug)]
pub enum LibraryError {
    /// The given path does not exist or is not a directory
    InvalidPath(String),
    /// The path is already a scan root
    AlreadyTracked(String),
    /// The path is not a known scan root
    NotTracked(String),
    /// Persistence failed
    Store(LibraryStoreError),
}

impl std::fmt::Display for LibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(path) => write!(f, "Not a directory: {}", path),
            Self::AlreadyTracked(path) => write!(f, "Already in the library: {}", path),
            Self::NotTracked(path) => write!(f, "Not in the library: {}", path),
            Self::Store(e) => write!(f, "Library store error: {}", e),
        }
    }
}

impl std::error::Error for LibraryError {}

impl From<LibraryStoreError> for LibraryError {
    fn from(err: LibraryStoreError) -> Self {
        LibraryError::Store(err)
    }
}

/// In-memory library state plus its optional persistence handle.
struct Library {
    roots: Vec<LibraryPath>,
    index: DirectoryIndex,
    /// `None` when the DB could not be opened; the library then runs
    /// memory-only for this process.
    store: Option<LibraryStore>,
}

impl Library {
    fn empty() -> Library {
        Library {
            roots: Vec::new(),
            index: DirectoryIndex::build(&[]),
            store: None,
        }
    }
}

static LIBRARY: LazyLock<Mutex<Library>> = LazyLock::new(|| Mutex::new(Library::empty()));

/// Expands tilde (~) to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if (path.starts_with("~/") || path == "~")
        && let Some(home) = dirs::home_dir()
    {
        return path.replacen("~", &home.to_string_lossy(), 1);
    }
    path.to_string()
}

/// Opens the library database and loads persisted state. A failed open is
/// downgraded to memory-only operation with a warning; the app must still
/// start when the data dir is unwritable.
pub fn init(db_path: &Path) {
    let mut library = LIBRARY.lock_ignore_poison();
    match LibraryStore::open(db_path) {
        Ok(store) => match store.load() {
            Ok((roots, directories)) => {
                info!(
                    "Library loaded: {} roots, {} directories",
                    roots.len(),
                    directories.len()
                );
                library.index = DirectoryIndex::build(&directories);
                library.roots = roots;
                library.store = Some(store);
            }
            Err(e) => {
                warn!("Library load failed, starting empty: {e}");
                library.store = Some(store);
            }
        },
        Err(e) => {
            warn!("Library DB unavailable, running memory-only: {e}");
        }
    }
}

fn rebuild_index(library: &mut Library, directories: Vec<String>) {
    // The index is immutable once built; swap it wholesale.
    library.index = DirectoryIndex::build(&directories);
}

fn persisted_directories(library: &Library) -> Vec<String> {
    match library.store.as_ref().map(|s| s.load()) {
        Some(Ok((_, directories))) => directories,
        Some(Err(e)) => {
            warn!("Re-reading directories failed: {e}");
            library.index.paths().to_vec()
        }
        None => library.index.paths().to_vec(),
    }
}

/// Adds a new scan root: validates it, scans it, and folds the found
/// directories into the index. Returns the updated root list.
///
/// The scan itself runs on the caller's thread (the command layer wraps
/// this in `spawn_blocking`); the library lock is held only around the
/// state update, so a long scan never blocks concurrent reads.
pub fn add_path(raw_path: &str) -> Result<Vec<LibraryPath>, LibraryError> {
    let path = expand_tilde(raw_path.trim());
    if !PathBuf::from(&path).is_dir() {
        return Err(LibraryError::InvalidPath(path));
    }
    if LIBRARY
        .lock_ignore_poison()
        .roots
        .iter()
        .any(|r| r.directory_path == path)
    {
        return Err(LibraryError::AlreadyTracked(path));
    }

    let directories = scan_video_directories(Path::new(&path));
    info!("Scanned {path}: {} video directories", directories.len());

    let root = LibraryPath {
        directory_path: path.clone(),
        last_scanned: Some(Utc::now()),
        is_active: true,
    };

    let mut library = LIBRARY.lock_ignore_poison();
    // Re-check under the lock; two concurrent adds of the same path must
    // not both land.
    if library.roots.iter().any(|r| r.directory_path == path) {
        return Err(LibraryError::AlreadyTracked(path));
    }
    if let Some(store) = library.store.as_mut() {
        store.upsert_root(&root)?;
        store.replace_directories(&path, &directories)?;
    }
    library.roots.push(root);
    library.roots.sort_by(|a, b| a.directory_path.cmp(&b.directory_path));

    let mut all = persisted_directories(&library);
    if library.store.is_none() {
        all.extend(directories);
        all.sort();
        all.dedup();
    }
    rebuild_index(&mut library, all);
    Ok(library.roots.clone())
}

/// Rescans one existing root and refreshes its directories in the index.
pub fn rescan_path(raw_path: &str) -> Result<Vec<LibraryPath>, LibraryError> {
    let path = expand_tilde(raw_path.trim());
    if !LIBRARY
        .lock_ignore_poison()
        .roots
        .iter()
        .any(|r| r.directory_path == path)
    {
        return Err(LibraryError::NotTracked(path));
    }
    if !PathBuf::from(&path).is_dir() {
        return Err(LibraryError::InvalidPath(path));
    }

    let directories = scan_video_directories(Path::new(&path));
    info!("Rescanned {path}: {} video directories", directories.len());

    let mut library = LIBRARY.lock_ignore_poison();
    let Some(root) = library
        .roots
        .iter_mut()
        .find(|r| r.directory_path == path)
    else {
        return Err(LibraryError::NotTracked(path));
    };
    root.last_scanned = Some(Utc::now());
    let updated = root.clone();
    if let Some(store) = library.store.as_mut() {
        store.upsert_root(&updated)?;
        store.replace_directories(&path, &directories)?;
    }

    let mut all = persisted_directories(&library);
    if library.store.is_none() {
        // Memory-only: drop the root's old entries before merging the new scan
        all.retain(|dir| !is_under(dir, &path));
        all.extend(directories);
        all.sort();
        all.dedup();
    }
    rebuild_index(&mut library, all);
    Ok(library.roots.clone())
}

/// Removes a scan root and its directories from the index.
pub fn remove_path(raw_path: &str) -> Result<Vec<LibraryPath>, LibraryError> {
    let path = expand_tilde(raw_path.trim());
    let mut library = LIBRARY.lock_ignore_poison();
    let before = library.roots.len();
    library.roots.retain(|r| r.directory_path != path);
    if library.roots.len() == before {
        return Err(LibraryError::NotTracked(path));
    }
    if let Some(store) = library.store.as_mut() {
        store.remove_root(&path)?;
    }

    let mut all = persisted_directories(&library);
    if library.store.is_none() {
        all.retain(|dir| !is_under(dir, &path));
    }
    rebuild_index(&mut library, all);
    Ok(library.roots.clone())
}

/// Returns the scan roots, sorted by path.
pub fn list_paths() -> Vec<LibraryPath> {
    LIBRARY.lock_ignore_poison().roots.clone()
}

/// Returns the top-level entries of the scanned library.
pub fn root_entries() -> Vec<DirEntry> {
    LIBRARY.lock_ignore_poison().index.root_entries()
}

/// Returns the immediate children of `path` in the scanned library.
pub fn child_entries(path: &str) -> Vec<DirEntry> {
    LIBRARY.lock_ignore_poison().index.child_entries(path)
}

/// Resolves the breadcrumb trail for `current_path`.
pub fn breadcrumbs(current_path: &str) -> BreadcrumbTrail {
    let library = LIBRARY.lock_ignore_poison();
    crate::path_index::resolve(current_path, &library.index)
}
