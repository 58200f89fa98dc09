use std::fmt;
use std::sync::Arc;

use crate::connection::{Connection, TransactionRequest};
use crate::statement::IntoBatch;

use super::TransactionCallbacks;

/// Submits statement batches to a [`Connection`] as single transactions.
#[derive(Clone)]
pub struct TransactionExecutor {
    connection: Arc<dyn Connection>,
}

impl TransactionExecutor {
    #[must_use]
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    /// Run `statements` as one atomic unit.
    ///
    /// Returns immediately; outcomes arrive through `callbacks`, on the engine's thread.
    pub fn run(&self, statements: impl IntoBatch, callbacks: TransactionCallbacks) {
        let statements = statements.into_batch();
        for statement in &statements {
            if let Err(err) = statement.check_arity() {
                tracing::warn!(%err, "submitting statement with mismatched parameters");
            }
        }
        tracing::debug!(statements = statements.len(), "submitting transaction");

        self.connection.submit(TransactionRequest {
            statements,
            callbacks: callbacks.with_defaults(),
        });
    }
}

impl fmt::Debug for TransactionExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionExecutor").finish_non_exhaustive()
    }
}
