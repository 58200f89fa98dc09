//! Pure statement builders.
//!
//! Every builder returns a single [`Statement`] whose text is deterministic for a given input
//! ordering, so textual equality can be used to compare them.

use indexmap::IndexMap;

use crate::condition::Condition;
use crate::statement::Statement;
use crate::types::RowValues;

mod ddl;
mod dml;
mod select;

pub use ddl::create_table;
pub use dml::{destroy, insert, update};
pub use select::select;

/// The `values` argument of [`insert`].
#[derive(Debug, Clone, PartialEq)]
pub enum InsertValues {
    /// Column to value pairs; emits an explicit column list.
    Keyed(IndexMap<String, RowValues>),
    /// Values in table column order; no column list.
    Positional(Vec<RowValues>),
    /// A condition fragment. Keyed fragments behave like [`InsertValues::Keyed`]; raw and
    /// paired text is placed verbatim inside `VALUES(...)`.
    Fragment(Condition),
}

impl InsertValues {
    /// Keyed values from column and value pairs, kept in the given order.
    ///
    /// ```rust
    /// use sql_localstore::prelude::*;
    ///
    /// let values = InsertValues::keyed([("name", RowValues::from("John")), ("age", RowValues::Int(30))]);
    /// let statement = insert("people", values)?;
    /// assert_eq!(statement.text, "INSERT INTO people(name,age) VALUES(?, ?);");
    /// # Ok::<(), LocalStoreError>(())
    /// ```
    #[must_use]
    pub fn keyed<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RowValues>,
    {
        InsertValues::Keyed(
            entries
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
    }
}

impl From<Vec<RowValues>> for InsertValues {
    fn from(values: Vec<RowValues>) -> Self {
        InsertValues::Positional(values)
    }
}

impl<const N: usize> From<[RowValues; N]> for InsertValues {
    fn from(values: [RowValues; N]) -> Self {
        InsertValues::Positional(values.into_iter().collect())
    }
}

impl From<IndexMap<String, RowValues>> for InsertValues {
    fn from(entries: IndexMap<String, RowValues>) -> Self {
        InsertValues::Keyed(entries)
    }
}

impl From<Condition> for InsertValues {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Keyed(entries) => InsertValues::Keyed(entries),
            other => InsertValues::Fragment(other),
        }
    }
}

fn log_statement(statement: &Statement) {
    tracing::debug!(sql = %statement.text, params = ?statement.params, "built statement");
}
