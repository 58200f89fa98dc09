use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{ToSql, Transaction};

use super::params::Params;
use crate::error::LocalStoreError;
use crate::results::ResultSet;
use crate::statement::Statement;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
/// Returns `LocalStoreError::SqliteError` if the value cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, LocalStoreError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    })
}

/// Run a row-returning statement and collect every row.
///
/// # Errors
/// Returns `LocalStoreError::SqliteError` if execution or row extraction fails.
pub fn build_result_set(
    stmt: &mut rusqlite::Statement<'_>,
    params: &[Value],
) -> Result<ResultSet, LocalStoreError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query(&param_refs[..])?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Execute one statement inside an open transaction.
///
/// Statements that produce columns return their rows; others report the number of changed
/// rows and, for inserts, the new row id.
pub(super) fn execute_statement(
    tx: &Transaction<'_>,
    statement: &Statement,
) -> Result<ResultSet, LocalStoreError> {
    let params = Params::convert(&statement.params);
    let mut stmt = tx.prepare(&statement.text)?;
    if stmt.column_count() > 0 {
        return build_result_set(&mut stmt, params.as_values());
    }

    let rows_affected = stmt.execute(&params.as_refs()[..])?;
    let last_insert_id = is_insert(&statement.text).then(|| tx.last_insert_rowid());
    Ok(ResultSet::from_changes(rows_affected, last_insert_id))
}

/// Whether `sql` inserts rows: `INSERT`, `REPLACE`, or a `WITH` prefix ending in either.
///
/// Only consulted for statements without result columns, so a `WITH ... SELECT` never
/// reaches it.
fn is_insert(sql: &str) -> bool {
    let mut words = sql
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty());
    let inserts = |word: &str| {
        word.eq_ignore_ascii_case("insert") || word.eq_ignore_ascii_case("replace")
    };
    match words.next() {
        Some(first) if first.eq_ignore_ascii_case("with") => words.any(inserts),
        Some(first) => inserts(first),
        None => false,
    }
}
