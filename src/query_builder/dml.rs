use crate::condition::{Condition, Joiner, normalize};
use crate::error::LocalStoreError;
use crate::statement::Statement;

use super::{InsertValues, log_statement};

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// `INSERT INTO <table>[(<cols>)] VALUES(?, ...);`
///
/// # Errors
/// Returns [`LocalStoreError::BuildError`] when there is nothing to insert.
pub fn insert(table: &str, values: InsertValues) -> Result<Statement, LocalStoreError> {
    let (columns_sql, values_sql, params) = match values {
        InsertValues::Keyed(entries) | InsertValues::Fragment(Condition::Keyed(entries)) => {
            let mut columns = Vec::with_capacity(entries.len());
            let mut params = Vec::with_capacity(entries.len());
            for (column, value) in entries {
                columns.push(column);
                params.push(value);
            }
            (format!("({})", columns.join(",")), placeholders(params.len()), params)
        }
        InsertValues::Positional(params) => (String::new(), placeholders(params.len()), params),
        InsertValues::Fragment(condition) => {
            let normalized = normalize(Some(&condition), Joiner::Comma)?;
            (
                String::new(),
                normalized.text.unwrap_or_default(),
                normalized.params,
            )
        }
    };
    if values_sql.is_empty() {
        return Err(LocalStoreError::BuildError(format!(
            "insert into {table} has no values"
        )));
    }

    let statement = Statement {
        text: format!("INSERT INTO {table}{columns_sql} VALUES({values_sql});"),
        params,
    };
    log_statement(&statement);
    Ok(statement)
}

/// `UPDATE <table> SET <changes>[ WHERE <where>];`
///
/// SET parameters come first, followed by WHERE parameters.
///
/// # Errors
/// Returns [`LocalStoreError::BuildError`] when `changes` is empty.
pub fn update(
    table: &str,
    changes: &Condition,
    where_clause: &Condition,
) -> Result<Statement, LocalStoreError> {
    let set = normalize(Some(changes), Joiner::Comma)?;
    let Some(set_sql) = set.text else {
        return Err(LocalStoreError::BuildError(format!(
            "update of {table} has no changes"
        )));
    };
    let filter = normalize(Some(where_clause), Joiner::And)?;

    let mut sql = format!("UPDATE {table} SET {set_sql}");
    if let Some(clause) = filter.text {
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }
    sql.push(';');

    let mut params = set.params;
    params.extend(filter.params);

    let statement = Statement { text: sql, params };
    log_statement(&statement);
    Ok(statement)
}

/// `DELETE FROM <table>[ WHERE <where>];`
///
/// # Errors
/// Returns [`LocalStoreError::BuildError`] when `where_clause` is a blank pair with parameters.
pub fn destroy(table: &str, where_clause: &Condition) -> Result<Statement, LocalStoreError> {
    let filter = normalize(Some(where_clause), Joiner::And)?;
    let mut sql = format!("DELETE FROM {table}");
    if let Some(clause) = filter.text {
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }
    sql.push(';');

    let statement = Statement {
        text: sql,
        params: filter.params,
    };
    log_statement(&statement);
    Ok(statement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowValues;

    fn text(value: &str) -> RowValues {
        RowValues::Text(value.into())
    }

    #[test]
    fn insert_positional() -> Result<(), LocalStoreError> {
        let statement = insert("people", vec![text("John"), RowValues::Int(30)].into())?;
        assert_eq!(statement.text, "INSERT INTO people VALUES(?, ?);");
        assert_eq!(statement.params, vec![text("John"), RowValues::Int(30)]);
        Ok(())
    }

    #[test]
    fn insert_keyed_lists_columns_in_order() -> Result<(), LocalStoreError> {
        let values = InsertValues::keyed([("name", text("John")), ("age", RowValues::Int(30))]);
        let statement = insert("people", values)?;
        assert_eq!(statement.text, "INSERT INTO people(name,age) VALUES(?, ?);");
        assert_eq!(statement.params, vec![text("John"), RowValues::Int(30)]);
        Ok(())
    }

    #[test]
    fn insert_fragment_is_verbatim() -> Result<(), LocalStoreError> {
        let statement = insert("people", Condition::paired("?, 30", "John").into())?;
        assert_eq!(statement.text, "INSERT INTO people VALUES(?, 30);");
        assert_eq!(statement.params, vec![text("John")]);
        Ok(())
    }

    #[test]
    fn insert_without_values_is_rejected() {
        assert!(insert("people", Vec::new().into()).is_err());
    }

    #[test]
    fn update_with_strings() -> Result<(), LocalStoreError> {
        let statement = update(
            "people",
            &Condition::raw("name = \"John\""),
            &Condition::raw("name = \"Bob\""),
        )?;
        assert_eq!(
            statement.text,
            "UPDATE people SET name = \"John\" WHERE name = \"Bob\";"
        );
        assert!(statement.params.is_empty());
        Ok(())
    }

    #[test]
    fn update_params_put_changes_before_where() -> Result<(), LocalStoreError> {
        let statement = update(
            "people",
            &Condition::keyed([("name", "John")]),
            &Condition::keyed([("name", "Bob")]),
        )?;
        assert_eq!(statement.text, "UPDATE people SET name=? WHERE name=?;");
        assert_eq!(statement.params, vec![text("John"), text("Bob")]);

        let statement = update(
            "people",
            &Condition::paired("name = ?", "John"),
            &Condition::paired("name = ? AND age = ?", vec![text("Bob"), RowValues::Int(3)]),
        )?;
        assert_eq!(statement.text, "UPDATE people SET name = ? WHERE name = ? AND age = ?;");
        assert_eq!(statement.params, vec![text("John"), text("Bob"), RowValues::Int(3)]);
        Ok(())
    }

    #[test]
    fn update_mixed_forms_concatenate() -> Result<(), LocalStoreError> {
        let statement = update(
            "people",
            &Condition::keyed([("name", text("John")), ("age", RowValues::Int(31))]),
            &Condition::paired("name = ?", "Bob"),
        )?;
        assert_eq!(statement.text, "UPDATE people SET name=?, age=? WHERE name = ?;");
        assert_eq!(
            statement.params,
            vec![text("John"), RowValues::Int(31), text("Bob")]
        );
        Ok(())
    }

    #[test]
    fn update_without_changes_is_rejected() {
        let changes = Condition::keyed(Vec::<(String, RowValues)>::new());
        assert!(update("people", &changes, &Condition::raw("1")).is_err());
    }

    #[test]
    fn update_with_blank_paired_where_is_rejected() {
        let built = update(
            "people",
            &Condition::keyed([("age", 31_i64)]),
            &Condition::paired(" ", "John"),
        );
        assert!(matches!(built, Err(LocalStoreError::BuildError(_))));

        let built = update(
            "people",
            &Condition::paired("", "John"),
            &Condition::raw("1"),
        );
        assert!(matches!(built, Err(LocalStoreError::BuildError(_))));
    }

    #[test]
    fn destroy_forms() -> Result<(), LocalStoreError> {
        assert_eq!(
            destroy("people", &Condition::raw("name = \"John\""))?.text,
            "DELETE FROM people WHERE name = \"John\";"
        );
        let statement = destroy("people", &Condition::keyed([("name", "John")]))?;
        assert_eq!(statement.text, "DELETE FROM people WHERE name=?;");
        assert_eq!(statement.params, vec![text("John")]);
        Ok(())
    }

    #[test]
    fn destroy_with_blank_paired_where_is_rejected() -> Result<(), LocalStoreError> {
        assert!(matches!(
            destroy("people", &Condition::paired("", "John")),
            Err(LocalStoreError::BuildError(_))
        ));
        let everything = destroy("people", &Condition::paired("", Vec::<RowValues>::new()))?;
        assert_eq!(everything.text, "DELETE FROM people;");
        assert!(everything.params.is_empty());
        Ok(())
    }
}
