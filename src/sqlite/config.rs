use std::path::PathBuf;

use serde::Deserialize;

use super::worker::SqliteConnection;
use crate::database::default_name;
use crate::error::LocalStoreError;

/// Default byte quota for a database.
pub const DEFAULT_SIZE: u64 = 2_000_000;

/// Options for opening a `SQLite` connection.
///
/// Loadable from JSON; missing fields take their defaults:
/// ```rust
/// use sql_localstore::prelude::*;
///
/// let opts = SqliteOptions::from_json(r#"{ "name": "people", "version": 2 }"#)?;
/// assert_eq!(opts.name, "people");
/// assert_eq!(opts.size, 2_000_000);
/// assert!(opts.db_path.is_none());
/// # Ok::<(), LocalStoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqliteOptions {
    /// Database name; also names the worker thread.
    pub name: String,
    /// File to open. `None` opens a private in-memory database.
    pub db_path: Option<PathBuf>,
    /// Schema version kept in `PRAGMA user_version`. `None` adopts the stored one.
    pub version: Option<u32>,
    /// Byte quota, enforced through `PRAGMA max_page_count`.
    pub size: u64,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self {
            name: default_name(),
            db_path: None,
            version: None,
            size: DEFAULT_SIZE,
        }
    }
}

impl SqliteOptions {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    /// Returns [`LocalStoreError::ConfigError`] if the document does not match.
    pub fn from_json(json: &str) -> Result<Self, LocalStoreError> {
        serde_json::from_str(json)
            .map_err(|err| LocalStoreError::ConfigError(format!("invalid SQLite options: {err}")))
    }

    #[must_use]
    pub fn builder() -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new()
    }

    /// Open the database and apply quota and version settings.
    pub(super) fn connect(&self) -> Result<(rusqlite::Connection, u32), LocalStoreError> {
        let conn = match &self.db_path {
            Some(path) => {
                let conn = rusqlite::Connection::open(path)?;
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
                conn
            }
            None => rusqlite::Connection::open_in_memory()?,
        };

        let page_size: i64 = conn.pragma_query_value(None, "page_size", |row| row.get(0))?;
        let size = i64::try_from(self.size).unwrap_or(i64::MAX);
        let page_size = page_size.max(1);
        let max_pages = size.saturating_add(page_size - 1) / page_size;
        conn.pragma_update(None, "max_page_count", max_pages.max(1))?;

        let version = reconcile_version(&conn, self.version)?;
        Ok((conn, version))
    }
}

fn reconcile_version(
    conn: &rusqlite::Connection,
    requested: Option<u32>,
) -> Result<u32, LocalStoreError> {
    let stored: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    match requested {
        None => Ok(stored),
        Some(version) if version == stored => Ok(stored),
        Some(version) if stored == 0 => {
            conn.pragma_update(None, "user_version", version)?;
            Ok(version)
        }
        Some(version) => Err(LocalStoreError::ConfigError(format!(
            "database version mismatch: requested {version}, found {stored}"
        ))),
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone, Default)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.opts.name = name.into();
        self
    }

    #[must_use]
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.opts.db_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn version(mut self, version: u32) -> Self {
        self.opts.version = Some(version);
        self
    }

    #[must_use]
    pub fn size(mut self, size: u64) -> Self {
        self.opts.size = size;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open a connection with these options.
    ///
    /// # Errors
    /// Returns `LocalStoreError` if the database cannot be opened or configured.
    pub fn open(self) -> Result<SqliteConnection, LocalStoreError> {
        SqliteConnection::open(self.finish())
    }
}
