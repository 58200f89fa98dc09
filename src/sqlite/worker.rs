use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, SendError, Sender};
use std::thread;

use super::config::SqliteOptions;
use super::dispatcher::{Command, run_sqlite_worker};
use crate::connection::{Connection, TransactionRequest};
use crate::error::LocalStoreError;

/// `SQLite` connection owned by a dedicated worker thread.
///
/// Transactions are queued to the worker and run one at a time in submission order. All
/// callbacks for this connection run on the worker thread. The worker stops once the last
/// handle is dropped.
#[derive(Clone)]
pub struct SqliteConnection {
    worker: Arc<SqliteWorker>,
}

impl SqliteConnection {
    /// Open the database described by `options` and start its worker.
    ///
    /// # Errors
    /// Returns [`LocalStoreError`] if the database cannot be opened or configured, or the
    /// worker thread cannot be spawned.
    pub fn open(options: SqliteOptions) -> Result<Self, LocalStoreError> {
        let (conn, version) = options.connect()?;
        let worker = SqliteWorker::spawn(conn, options.name, version)?;
        Ok(Self {
            worker: Arc::new(worker),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.worker.name
    }

    /// Schema version in effect after opening.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.worker.version
    }
}

impl Connection for SqliteConnection {
    fn submit(&self, request: TransactionRequest) {
        if let Err(SendError(Command::Transaction(request))) =
            self.worker.sender.send(Command::Transaction(request))
        {
            request.callbacks.error(&LocalStoreError::ConnectionUnavailable(
                "SQLite worker closed".into(),
            ));
        }
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("name", &self.worker.name)
            .field("version", &self.worker.version)
            .finish()
    }
}

struct SqliteWorker {
    sender: Sender<Command>,
    name: String,
    version: u32,
}

impl SqliteWorker {
    fn spawn(
        conn: rusqlite::Connection,
        name: String,
        version: u32,
    ) -> Result<Self, LocalStoreError> {
        let (sender, receiver) = mpsc::channel::<Command>();
        thread::Builder::new()
            .name(format!("sqlite-worker-{name}"))
            .spawn(move || run_sqlite_worker(conn, &receiver))
            .map_err(|err| {
                LocalStoreError::ConnectionUnavailable(format!(
                    "failed to spawn SQLite worker thread: {err}"
                ))
            })?;

        Ok(Self {
            sender,
            name,
            version,
        })
    }
}

impl Drop for SqliteWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
    }
}
