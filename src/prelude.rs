//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::condition::{Condition, Joiner, Normalized, normalize};
pub use crate::connection::{Connection, TransactionRequest};
pub use crate::database::Database;
pub use crate::error::LocalStoreError;
pub use crate::query_builder::{InsertValues, create_table, destroy, insert, select, update};
pub use crate::results::{LazyResultView, ResultSet, Row};
pub use crate::statement::{IntoBatch, Statement};
pub use crate::transaction::{
    CallbackSet, QueryErrorAction, TransactionCallbacks, TransactionExecutor,
};
pub use crate::types::{IntoParams, RowValues, Status};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteConnection, SqliteOptions, SqliteOptionsBuilder};
