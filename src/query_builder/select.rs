use crate::condition::{Condition, Joiner, normalize};
use crate::error::LocalStoreError;
use crate::statement::Statement;

use super::log_statement;

/// `SELECT * FROM <table>[ WHERE <clause>];`
///
/// # Arguments
/// * `table` - Table to read from
/// * `where_clause` - Optional filter; an empty one selects every row
///
/// # Errors
/// Returns [`LocalStoreError::BuildError`] when `where_clause` is a blank pair with parameters.
pub fn select(
    table: &str,
    where_clause: Option<&Condition>,
) -> Result<Statement, LocalStoreError> {
    let normalized = normalize(where_clause, Joiner::And)?;
    let mut sql = format!("SELECT * FROM {table}");
    if let Some(clause) = normalized.text {
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }
    sql.push(';');

    let statement = Statement {
        text: sql,
        params: normalized.params,
    };
    log_statement(&statement);
    Ok(statement)
}
