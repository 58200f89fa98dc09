use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::condition::Condition;
use crate::connection::Connection;
use crate::error::LocalStoreError;
use crate::query_builder::{self, InsertValues};
use crate::results::LazyResultView;
use crate::statement::{IntoBatch, Statement};
use crate::transaction::{QueryErrorAction, TransactionCallbacks, TransactionExecutor};

#[cfg(feature = "sqlite")]
use crate::sqlite::{SqliteConnection, SqliteOptions};

static NEXT_DB_ID: AtomicU64 = AtomicU64::new(1);

/// A fresh `db<N>` name, unique within the process.
#[must_use]
pub fn default_name() -> String {
    format!("db{}", NEXT_DB_ID.fetch_add(1, Ordering::Relaxed))
}

/// Convenience facade over one connection.
///
/// Every operation returns immediately. Writes report through the default transaction
/// callbacks; reads hand back a [`LazyResultView`] that fills in once the engine answers.
/// A database without a connection turns every operation into a no-op.
///
/// ```rust
/// use sql_localstore::prelude::*;
///
/// # async fn demo() -> Result<(), LocalStoreError> {
/// let db = Database::try_open(SqliteOptions::new("people"))?;
/// db.create_table("people", [("name", "text"), ("age", "integer")]);
/// db.insert(
///     "people",
///     InsertValues::keyed([("name", RowValues::from("John")), ("age", RowValues::Int(30))]),
/// );
///
/// let people = db.find("people", Condition::keyed([("name", "John")]));
/// people.ready().await;
/// assert_eq!(people.length(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Database {
    name: String,
    version: Option<u32>,
    executor: Option<TransactionExecutor>,
}

impl Database {
    /// Open a `SQLite` database. Failure is logged once and leaves the instance unavailable.
    #[cfg(feature = "sqlite")]
    #[must_use]
    pub fn open(options: SqliteOptions) -> Self {
        let name = options.name.clone();
        match Self::try_open(options) {
            Ok(db) => db,
            Err(err) => {
                tracing::error!(database = %name, %err, "failed to open database");
                Self::unavailable(name)
            }
        }
    }

    /// Open a `SQLite` database.
    ///
    /// # Errors
    /// Returns [`LocalStoreError`] if the database cannot be opened or configured.
    #[cfg(feature = "sqlite")]
    pub fn try_open(options: SqliteOptions) -> Result<Self, LocalStoreError> {
        let conn = SqliteConnection::open(options)?;
        Ok(Self {
            name: conn.name().to_owned(),
            version: Some(conn.version()),
            executor: Some(TransactionExecutor::new(Arc::new(conn))),
        })
    }

    /// Wrap an already-open connection under a generated name.
    #[must_use]
    pub fn with_connection(connection: impl Connection + 'static) -> Self {
        Self {
            name: default_name(),
            version: None,
            executor: Some(TransactionExecutor::new(Arc::new(connection))),
        }
    }

    /// A database with no engine behind it.
    #[must_use]
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            executor: None,
        }
    }

    /// The database name, either the configured one or a generated `db<N>`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema version in effect after opening.
    ///
    /// # Returns
    /// * `Some(version)` - For `SQLite`, the reconciled `PRAGMA user_version`
    /// * `None` - For unavailable databases and wrapped connections, which carry no version
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Whether a connection backs this database. When `false`, every operation is a no-op.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.executor.is_some()
    }

    /// Run `statements` as one transaction.
    pub fn transaction(&self, statements: impl IntoBatch, callbacks: TransactionCallbacks) {
        if let Some(executor) = self.executor("transaction") {
            executor.run(statements, callbacks);
        }
    }

    /// Create `table`; an existing table is not reported as an error.
    pub fn create_table<I, K, V>(&self, table: &str, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let Some(executor) = self.executor("create_table") else {
            return;
        };
        let Some(statement) = report_build(query_builder::create_table(table, fields)) else {
            return;
        };
        executor.run(
            statement,
            TransactionCallbacks::new().on_query_error(|statement, err| {
                tracing::debug!(sql = %statement, %err, "suppressed create table error");
                QueryErrorAction::Continue
            }),
        );
    }

    /// Find rows in `table` matching `where_clause`.
    ///
    /// # Arguments
    /// * `table` - Table to read from
    /// * `where_clause` - Raw SQL, a `(text, params)` pair, or a column to value mapping
    ///
    /// # Returns
    /// * `LazyResultView` - Empty now, ready once the engine delivers the rows. It stays
    ///   empty if the statement cannot be built or fails in the engine.
    pub fn find(&self, table: &str, where_clause: impl Into<Condition>) -> LazyResultView {
        self.find_with(table, Some(&where_clause.into()))
    }

    /// Find every row in `table`.
    pub fn find_all(&self, table: &str) -> LazyResultView {
        self.find_with(table, None)
    }

    fn find_with(&self, table: &str, where_clause: Option<&Condition>) -> LazyResultView {
        let view = LazyResultView::create();
        let Some(executor) = self.executor("find") else {
            return view;
        };

        let Some(statement) = report_build(query_builder::select(table, where_clause)) else {
            return view;
        };
        let target = view.clone();
        executor.run(
            statement,
            TransactionCallbacks::new().on_query_data(move |_, rows| {
                let _ = target.populate(rows);
            }),
        );
        view
    }

    /// Insert one row.
    pub fn insert(&self, table: &str, values: impl Into<InsertValues>) {
        let Some(executor) = self.executor("insert") else {
            return;
        };
        if let Some(statement) = report_build(query_builder::insert(table, values.into())) {
            executor.run(statement, TransactionCallbacks::new());
        }
    }

    /// Apply `changes` to the rows matching `where_clause`.
    pub fn update(
        &self,
        table: &str,
        changes: impl Into<Condition>,
        where_clause: impl Into<Condition>,
    ) {
        let Some(executor) = self.executor("update") else {
            return;
        };
        let built = query_builder::update(table, &changes.into(), &where_clause.into());
        if let Some(statement) = report_build(built) {
            executor.run(statement, TransactionCallbacks::new());
        }
    }

    /// Delete the rows matching `where_clause`.
    pub fn destroy(&self, table: &str, where_clause: impl Into<Condition>) {
        let Some(executor) = self.executor("destroy") else {
            return;
        };
        let built = query_builder::destroy(table, &where_clause.into());
        if let Some(statement) = report_build(built) {
            executor.run(statement, TransactionCallbacks::new());
        }
    }

    fn executor(&self, operation: &str) -> Option<&TransactionExecutor> {
        if self.executor.is_none() {
            tracing::debug!(database = %self.name, operation, "no connection; skipping");
        }
        self.executor.as_ref()
    }
}

/// Route a builder failure to the default transaction error handler.
fn report_build(built: Result<Statement, LocalStoreError>) -> Option<Statement> {
    match built {
        Ok(statement) => Some(statement),
        Err(err) => {
            TransactionCallbacks::new().with_defaults().error(&err);
            None
        }
    }
}
