use std::fmt;

use crate::error::LocalStoreError;
use crate::results::ResultSet;
use crate::statement::Statement;

/// What the engine should do after a statement fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorAction {
    /// Keep running the remaining statements.
    Continue,
    /// Roll back the whole transaction and report it through `on_error`.
    Abort,
}

pub type QueryDataFn = Box<dyn FnMut(&Statement, ResultSet) + Send>;
pub type QueryErrorFn = Box<dyn FnMut(&Statement, &LocalStoreError) -> QueryErrorAction + Send>;
pub type SuccessFn = Box<dyn FnOnce() + Send>;
pub type ErrorFn = Box<dyn FnOnce(&LocalStoreError) + Send>;

/// Caller-supplied callback overrides for one transaction.
///
/// Anything left unset falls back to a default when the transaction is submitted:
///
/// | callback | default |
/// |---|---|
/// | `on_query_data` | no-op |
/// | `on_query_error` | log the error and its engine code, then continue |
/// | `on_success` | no-op |
/// | `on_error` | log the error |
///
/// ```rust
/// use sql_localstore::prelude::*;
///
/// let callbacks = TransactionCallbacks::new()
///     .on_query_error(|_, _| QueryErrorAction::Abort)
///     .on_success(|| println!("committed"));
/// # let _ = callbacks;
/// ```
#[derive(Default)]
pub struct TransactionCallbacks {
    on_query_data: Option<QueryDataFn>,
    on_query_error: Option<QueryErrorFn>,
    on_success: Option<SuccessFn>,
    on_error: Option<ErrorFn>,
}

impl TransactionCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with each statement's result set.
    #[must_use]
    pub fn on_query_data<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Statement, ResultSet) + Send + 'static,
    {
        self.on_query_data = Some(Box::new(callback));
        self
    }

    /// Called when a single statement fails; decides whether the batch continues.
    #[must_use]
    pub fn on_query_error<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Statement, &LocalStoreError) -> QueryErrorAction + Send + 'static,
    {
        self.on_query_error = Some(Box::new(callback));
        self
    }

    /// Called once after the transaction commits.
    #[must_use]
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Called once when the transaction fails or is rolled back.
    #[must_use]
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&LocalStoreError) + Send + 'static,
    {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Fill every unset callback with its default.
    #[must_use]
    pub fn with_defaults(self) -> CallbackSet {
        let on_query_data: QueryDataFn = match self.on_query_data {
            Some(callback) => callback,
            None => Box::new(ignore_query_data),
        };
        let on_query_error: QueryErrorFn = match self.on_query_error {
            Some(callback) => callback,
            None => Box::new(default_query_error),
        };
        let on_success: SuccessFn = match self.on_success {
            Some(callback) => callback,
            None => Box::new(ignore_success),
        };
        let on_error: ErrorFn = match self.on_error {
            Some(callback) => callback,
            None => Box::new(log_error),
        };
        CallbackSet {
            on_query_data,
            on_query_error,
            on_success,
            on_error,
        }
    }
}

impl fmt::Debug for TransactionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionCallbacks")
            .field("on_query_data", &self.on_query_data.is_some())
            .field("on_query_error", &self.on_query_error.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// The complete callback bundle an engine invokes.
pub struct CallbackSet {
    on_query_data: QueryDataFn,
    on_query_error: QueryErrorFn,
    on_success: SuccessFn,
    on_error: ErrorFn,
}

impl Default for CallbackSet {
    fn default() -> Self {
        TransactionCallbacks::default().with_defaults()
    }
}

impl CallbackSet {
    pub fn query_data(&mut self, statement: &Statement, rows: ResultSet) {
        (self.on_query_data)(statement, rows);
    }

    pub fn query_error(
        &mut self,
        statement: &Statement,
        error: &LocalStoreError,
    ) -> QueryErrorAction {
        (self.on_query_error)(statement, error)
    }

    pub fn success(self) {
        (self.on_success)();
    }

    pub fn error(self, error: &LocalStoreError) {
        (self.on_error)(error);
    }
}

impl fmt::Debug for CallbackSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSet").finish_non_exhaustive()
    }
}

fn ignore_query_data(_: &Statement, _: ResultSet) {}

fn ignore_success() {}

fn log_error(error: &LocalStoreError) {
    match error.code() {
        Some(code) => tracing::error!("SQLite Error: {error} (Code {code})"),
        None => tracing::error!("SQLite Error: {error}"),
    }
}

fn default_query_error(statement: &Statement, error: &LocalStoreError) -> QueryErrorAction {
    tracing::error!(sql = %statement, "statement failed");
    log_error(error);
    QueryErrorAction::Continue
}
