use std::collections::HashMap;
use std::sync::Arc;

use super::row::{Row, index_columns};
use crate::types::RowValues;

/// The outcome of one statement, as delivered by the engine.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the statement
    pub results: Vec<Row>,
    /// Rows changed by a DML statement, or rows returned by a query
    pub rows_affected: usize,
    /// Row id of the last inserted row, for INSERT statements
    pub last_insert_id: Option<i64>,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Result of a statement that returns no rows.
    #[must_use]
    pub fn from_changes(rows_affected: usize, last_insert_id: Option<i64>) -> ResultSet {
        ResultSet {
            rows_affected,
            last_insert_id,
            ..ResultSet::default()
        }
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(index_columns(&column_names)));
        self.column_names = Some(column_names);
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row built from raw values. Ignored until column names are set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let (Some(column_names), Some(column_index)) = (&self.column_names, &self.column_index)
        {
            self.results.push(Row::with_index(
                Arc::clone(column_names),
                Arc::clone(column_index),
                row_values,
            ));
            self.rows_affected += 1;
        }
    }

    /// Add an already-built row
    pub fn add_row(&mut self, row: Row) {
        if self.column_names.is_none() {
            self.set_column_names(Arc::clone(&row.column_names));
        }

        self.results.push(row);
        self.rows_affected += 1;
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Row at `index`, if any
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.results.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Arc<Vec<String>> {
        Arc::new(vec!["name".to_string(), "age".to_string()])
    }

    #[test]
    fn add_row_adopts_column_names() {
        let mut rows = ResultSet::default();
        assert!(rows.get_column_names().is_none());

        rows.add_row(Row::new(
            columns(),
            vec![RowValues::Text("John".into()), RowValues::Int(30)],
        ));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows_affected, 1);
        assert_eq!(
            rows.get_column_names().map(|names| names.as_slice()),
            Some(&["name".to_string(), "age".to_string()][..])
        );

        rows.add_row_values(vec![RowValues::Text("Bob".into()), RowValues::Int(41)]);
        let bob = rows.row(1);
        assert_eq!(bob.and_then(|row| row.get_column_index("age")), Some(1));
        assert_eq!(bob.and_then(|row| row.get("age")), Some(&RowValues::Int(41)));
    }

    #[test]
    fn values_are_ignored_until_columns_are_known() {
        let mut rows = ResultSet::with_capacity(1);
        rows.add_row_values(vec![RowValues::Null]);
        assert!(rows.is_empty());
        assert_eq!(rows.rows_affected, 0);
    }

    #[test]
    fn changes_carry_no_rows() {
        let rows = ResultSet::from_changes(3, Some(7));
        assert!(rows.is_empty());
        assert_eq!(rows.rows_affected, 3);
        assert_eq!(rows.last_insert_id, Some(7));
    }
}
