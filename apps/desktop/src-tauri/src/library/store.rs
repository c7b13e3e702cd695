//! SQLite persistence for the library.
//!
//! One DB file in the app data dir. Two payload tables: the scan roots
//! the user added, and the flat list of video-containing directories the
//! scanner found under them (so the breadcrumb filter works on the next
//! launch without a rescan). A `meta` table stamps the schema version;
//! on version mismatch or corruption the file is deleted and recreated —
//! everything in it can be regenerated by rescanning.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

use super::LibraryPath;

const SCHEMA_VERSION: &str = "1";

const CREATE_TABLES_SQL: &str = "
    CREATE TABLE IF NOT EXISTS library_paths (
        directory_path TEXT PRIMARY KEY,
        last_scanned   TEXT,
        is_active      INTEGER NOT NULL DEFAULT 1
    ) WITHOUT ROWID;

    CREATE TABLE IF NOT EXISTS directories (
        path      TEXT PRIMARY KEY,
        root_path TEXT NOT NULL
    ) WITHOUT ROWID;

    CREATE INDEX IF NOT EXISTS idx_directories_root ON directories (root_path);

    CREATE TABLE IF NOT EXISTS meta (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    ) WITHOUT ROWID;
";

/// Error type for library persistence.
#[derive(Debug)]
pub enum LibraryStoreError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
}

impl From<rusqlite::Error> for LibraryStoreError {
    fn from(err: rusqlite::Error) -> Self {
        LibraryStoreError::Sqlite(err)
    }
}

impl From<std::io::Error> for LibraryStoreError {
    fn from(err: std::io::Error) -> Self {
        LibraryStoreError::Io(err)
    }
}

impl std::fmt::Display for LibraryStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryStoreError::Sqlite(e) => write!(f, "SQLite error: {e}"),
            LibraryStoreError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for LibraryStoreError {}

fn apply_pragmas(conn: &Connection) -> Result<(), LibraryStoreError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

fn create_tables(conn: &Connection) -> Result<(), LibraryStoreError> {
    conn.execute_batch(CREATE_TABLES_SQL)?;
    Ok(())
}

fn reset_schema(conn: &Connection) -> Result<(), LibraryStoreError> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS library_paths;
         DROP TABLE IF EXISTS directories;
         DROP TABLE IF EXISTS meta;",
    )?;
    create_tables(conn)?;
    conn.execute(
        "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Handle to the library database.
pub struct LibraryStore {
    conn: Connection,
}

impl LibraryStore {
    /// Opens (or creates) the library database at `db_path`.
    ///
    /// On open failure the file is deleted and recreated; the library is
    /// advisory navigation data, never worth refusing to start over.
    pub fn open(db_path: &Path) -> Result<LibraryStore, LibraryStoreError> {
        match Self::try_open(db_path) {
            Ok(store) => Ok(store),
            Err(e) => {
                log::warn!("Library DB open failed ({e}), deleting and recreating");
                Self::delete_and_recreate(db_path)
            }
        }
    }

    fn try_open(db_path: &Path) -> Result<LibraryStore, LibraryStoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        apply_pragmas(&conn)?;
        create_tables(&conn)?;

        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .ok();
        match version {
            Some(v) if v == SCHEMA_VERSION => {}
            Some(v) => {
                log::warn!("Schema version mismatch (expected {SCHEMA_VERSION}, found {v}), resetting");
                reset_schema(&conn)?;
            }
            None => {
                conn.execute(
                    "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
                    params!["schema_version", SCHEMA_VERSION],
                )?;
            }
        }

        Ok(LibraryStore { conn })
    }

    fn delete_and_recreate(db_path: &Path) -> Result<LibraryStore, LibraryStoreError> {
        if db_path.exists() {
            std::fs::remove_file(db_path)?;
        }
        // WAL sidecars can be stale even when the main file is gone
        for suffix in ["-wal", "-shm"] {
            let sidecar = PathBuf::from(format!("{}{suffix}", db_path.display()));
            if sidecar.exists() {
                let _ = std::fs::remove_file(sidecar);
            }
        }
        Self::try_open(db_path)
    }

    /// Loads all scan roots and the flat directory list.
    pub fn load(&self) -> Result<(Vec<LibraryPath>, Vec<String>), LibraryStoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT directory_path, last_scanned, is_active FROM library_paths ORDER BY directory_path")?;
        let roots = stmt
            .query_map([], |row| {
                let last_scanned: Option<String> = row.get(1)?;
                Ok(LibraryPath {
                    directory_path: row.get(0)?,
                    last_scanned: last_scanned
                        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                        .map(|dt| dt.with_timezone(&Utc)),
                    is_active: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare("SELECT path FROM directories ORDER BY path")?;
        let directories = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok((roots, directories))
    }

    /// Inserts or refreshes one scan root.
    pub fn upsert_root(&self, root: &LibraryPath) -> Result<(), LibraryStoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO library_paths (directory_path, last_scanned, is_active)
             VALUES (?1, ?2, ?3)",
            params![
                root.directory_path,
                root.last_scanned.map(|dt| dt.to_rfc3339()),
                root.is_active,
            ],
        )?;
        Ok(())
    }

    /// Replaces the scanned directories recorded for one root.
    pub fn replace_directories(
        &mut self,
        root_path: &str,
        directories: &[String],
    ) -> Result<(), LibraryStoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM directories WHERE root_path = ?1", params![root_path])?;
        for dir in directories {
            tx.execute(
                "INSERT OR REPLACE INTO directories (path, root_path) VALUES (?1, ?2)",
                params![dir, root_path],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Removes a scan root and everything recorded under it.
    pub fn remove_root(&mut self, root_path: &str) -> Result<(), LibraryStoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM directories WHERE root_path = ?1", params![root_path])?;
        tx.execute(
            "DELETE FROM library_paths WHERE directory_path = ?1",
            params![root_path],
        )?;
        tx.commit()?;
        Ok(())
    }
}
