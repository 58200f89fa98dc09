use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection unavailable: {0}")]
    ConnectionUnavailable(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("Statement build error: {0}")]
    BuildError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Transaction error: {0}")]
    TransactionError(String),

    #[error("Result view already populated")]
    AlreadyPopulated,

    #[error("Other database error: {0}")]
    Other(String),
}

impl LocalStoreError {
    /// Engine-specific result code, when the engine reported one.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        match self {
            #[cfg(feature = "sqlite")]
            LocalStoreError::SqliteError(rusqlite::Error::SqliteFailure(err, _)) => {
                Some(err.extended_code)
            }
            _ => None,
        }
    }
}
