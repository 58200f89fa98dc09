//! A convenience layer over a transactional, callback-driven SQL engine.
//!
//! Loosely shaped fragments ([`Condition`]) are normalized into parameterized statements,
//! statements run as atomic batches through a [`Connection`], and reads come back as a
//! [`LazyResultView`] that is filled in when the engine delivers rows.

pub mod condition;
pub mod connection;
pub mod database;
pub mod error;
pub mod prelude;
pub mod query_builder;
pub mod results;
pub mod statement;
pub mod transaction;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use condition::{Condition, Joiner, Normalized, normalize};
pub use connection::{Connection, TransactionRequest};
pub use database::Database;
pub use error::LocalStoreError;
pub use query_builder::InsertValues;
pub use results::{LazyResultView, ResultSet, Row};
pub use statement::{IntoBatch, Statement};
pub use transaction::{CallbackSet, QueryErrorAction, TransactionCallbacks, TransactionExecutor};
pub use types::{IntoParams, RowValues, Status};
