use std::sync::Arc;

use crate::statement::Statement;
use crate::transaction::CallbackSet;

/// An ordered batch of statements plus the callbacks to report its outcome.
#[derive(Debug)]
pub struct TransactionRequest {
    pub statements: Vec<Statement>,
    pub callbacks: CallbackSet,
}

/// A transactional, callback-driven SQL engine.
///
/// Implementations run `request.statements` in order inside one transaction and report
/// through `request.callbacks`:
///
/// - each successful statement goes to `query_data`,
/// - each failed statement goes to `query_error`; on
///   [`QueryErrorAction::Abort`](crate::transaction::QueryErrorAction) the transaction is rolled
///   back and `error` is called,
/// - `success` follows a commit, `error` any transaction-level failure.
///
/// `submit` must not block on the engine; callbacks run later on the engine's own thread.
pub trait Connection: Send + Sync {
    fn submit(&self, request: TransactionRequest);
}

impl<C: Connection + ?Sized> Connection for Arc<C> {
    fn submit(&self, request: TransactionRequest) {
        (**self).submit(request);
    }
}
