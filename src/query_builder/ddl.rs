use crate::error::LocalStoreError;
use crate::statement::Statement;

use super::log_statement;

/// `CREATE TABLE <table>(<name> <def>, ...);` with fields in the given order.
///
/// # Errors
/// Returns [`LocalStoreError::BuildError`] when no fields are given.
pub fn create_table<I, K, V>(table: &str, fields: I) -> Result<Statement, LocalStoreError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let fields_sql: Vec<String> = fields
        .into_iter()
        .map(|(name, def)| format!("{} {}", name.as_ref(), def.as_ref()))
        .collect();
    if fields_sql.is_empty() {
        return Err(LocalStoreError::BuildError(format!(
            "table {table} needs at least one field"
        )));
    }

    let statement =
        Statement::without_params(format!("CREATE TABLE {table}({});", fields_sql.join(", ")));
    log_statement(&statement);
    Ok(statement)
}
