use std::sync::mpsc::Receiver;

use super::query::execute_statement;
use crate::connection::TransactionRequest;
use crate::error::LocalStoreError;
use crate::transaction::QueryErrorAction;

pub(super) enum Command {
    Transaction(TransactionRequest),
    Shutdown,
}

pub(super) fn run_sqlite_worker(mut conn: rusqlite::Connection, receiver: &Receiver<Command>) {
    while let Ok(command) = receiver.recv() {
        match command {
            Command::Transaction(request) => run_transaction(&mut conn, request),
            Command::Shutdown => break,
        }
    }
    tracing::debug!("SQLite worker stopped");
}

fn run_transaction(conn: &mut rusqlite::Connection, request: TransactionRequest) {
    let TransactionRequest {
        statements,
        mut callbacks,
    } = request;

    let tx = match conn.transaction() {
        Ok(tx) => tx,
        Err(err) => {
            callbacks.error(&LocalStoreError::SqliteError(err));
            return;
        }
    };

    for (idx, statement) in statements.iter().enumerate() {
        match execute_statement(&tx, statement) {
            Ok(rows) => callbacks.query_data(statement, rows),
            Err(err) => {
                if callbacks.query_error(statement, &err) == QueryErrorAction::Abort {
                    if let Err(rollback_err) = tx.rollback() {
                        tracing::error!(%rollback_err, "SQLite rollback failed");
                    }
                    callbacks.error(&LocalStoreError::TransactionError(format!(
                        "statement {} aborted the transaction: {err}",
                        idx + 1
                    )));
                    return;
                }
            }
        }
    }

    match tx.commit() {
        Ok(()) => callbacks.success(),
        Err(err) => callbacks.error(&LocalStoreError::TransactionError(format!(
            "commit failed: {err}"
        ))),
    }
}
