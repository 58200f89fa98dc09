//! Engine doubles for tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::connection::{Connection, TransactionRequest};
use crate::statement::Statement;

/// A [`Connection`] that records every request instead of running it.
///
/// Nothing is executed and no callback fires on its own; tests take the recorded requests
/// and drive their callbacks by hand, standing in for the engine. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnection {
    requests: Arc<Mutex<Vec<TransactionRequest>>>,
}

impl RecordingConnection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TransactionRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of requests waiting to be taken.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Every pending statement, in the order the engine would have seen them.
    #[must_use]
    pub fn statements(&self) -> Vec<Statement> {
        self.lock()
            .iter()
            .flat_map(|request| request.statements.iter().cloned())
            .collect()
    }

    /// Remove and return the pending requests, oldest first.
    #[must_use]
    pub fn take_requests(&self) -> Vec<TransactionRequest> {
        std::mem::take(&mut *self.lock())
    }
}

impl Connection for RecordingConnection {
    fn submit(&self, request: TransactionRequest) {
        self.lock().push(request);
    }
}
