//! Local persistence for projects, their topics, and their planned calendars.
//!
//! Each project lives in its own `SQLite` file under the storage root:
//!
//! ```text
//! <root>/<uuid>.sqlite
//!   project            # Project metadata (one row)
//!   topic              # Topics the planner draws from
//!   scheduled_content  # The current calendar, in generation order
//!   generation_log     # One row per article handed off for writing
//! ```

mod project;
mod schedule;
mod topic;

use std::{fs, io, path::PathBuf};

use rusqlite::Connection;
use tracing::debug;
use uuid::Uuid;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error("project already exists: {0}")]
    ProjectAlreadyExists(Uuid),

    #[error("scheduled entry not found: {0}")]
    EntryNotFound(i64),

    #[error("corrupt data: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
CREATE TABLE project (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);
CREATE TABLE topic (
    id                 TEXT PRIMARY KEY,
    name               TEXT NOT NULL,
    slug               TEXT NOT NULL,
    priority           INTEGER NOT NULL,
    target_percentage  REAL NOT NULL
);
CREATE TABLE scheduled_content (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    date            TEXT NOT NULL,
    topic_id        TEXT NOT NULL,
    topic_name      TEXT NOT NULL,
    content_type    TEXT NOT NULL,
    title           TEXT,
    focus_keyword   TEXT,
    priority_score  INTEGER NOT NULL,
    planned_time    TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT 'scheduled'
);
CREATE INDEX scheduled_content_date ON scheduled_content (date);
CREATE TABLE generation_log (
    topic_id      TEXT NOT NULL,
    generated_on  TEXT NOT NULL
);
";

/// Local file-based storage for projects.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.writgo/projects/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".writgo").join("projects"))
    }

    /// Creates a fresh database for a project and applies the schema.
    fn create_db(&self, id: Uuid) -> Result<Connection> {
        let path = self.db_path(id);
        if path.exists() {
            return Err(StorageError::ProjectAlreadyExists(id));
        }
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %path.display(), "created project database");
        Ok(conn)
    }

    /// Opens an existing project database.
    fn open_db(&self, id: Uuid) -> Result<Connection> {
        let path = self.db_path(id);
        if !path.exists() {
            return Err(StorageError::ProjectNotFound(id));
        }
        Ok(Connection::open(path)?)
    }

    fn db_path(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}.sqlite"))
    }
}
