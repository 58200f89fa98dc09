mod placeholders;

use std::fmt;

use crate::error::LocalStoreError;
use crate::types::{IntoParams, RowValues};

pub use placeholders::count_placeholders;

/// One SQL statement plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The SQL text, using `?` placeholders.
    pub text: String,
    /// The parameters bound to the placeholders, in order.
    pub params: Vec<RowValues>,
}

impl Statement {
    #[must_use]
    pub fn new(text: impl Into<String>, params: impl IntoParams) -> Self {
        Self {
            text: text.into(),
            params: params.into_params(),
        }
    }

    /// A statement with an empty parameter list.
    #[must_use]
    pub fn without_params(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// Verify that the placeholder count matches the parameter count.
    ///
    /// Statements using numbered or named parameters are accepted as-is.
    ///
    /// # Errors
    /// Returns [`LocalStoreError::ParameterError`] on a mismatch.
    pub fn check_arity(&self) -> Result<(), LocalStoreError> {
        match count_placeholders(&self.text) {
            Some(expected) if expected != self.params.len() => {
                Err(LocalStoreError::ParameterError(format!(
                    "statement has {expected} placeholders but {} parameters: {}",
                    self.params.len(),
                    self.text
                )))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Statement {
    fn from(text: &str) -> Self {
        Statement::without_params(text)
    }
}

impl From<String> for Statement {
    fn from(text: String) -> Self {
        Statement::without_params(text)
    }
}

impl<S: Into<String>, P: IntoParams> From<(S, P)> for Statement {
    fn from((text, params): (S, P)) -> Self {
        Statement::new(text, params)
    }
}

/// Conversion into an ordered batch of statements.
///
/// A single statement-like value becomes a one-element batch.
pub trait IntoBatch {
    fn into_batch(self) -> Vec<Statement>;
}

impl IntoBatch for Statement {
    fn into_batch(self) -> Vec<Statement> {
        vec![self]
    }
}

impl IntoBatch for &str {
    fn into_batch(self) -> Vec<Statement> {
        vec![Statement::from(self)]
    }
}

impl IntoBatch for String {
    fn into_batch(self) -> Vec<Statement> {
        vec![Statement::from(self)]
    }
}

impl<S: Into<String>, P: IntoParams> IntoBatch for (S, P) {
    fn into_batch(self) -> Vec<Statement> {
        vec![Statement::from(self)]
    }
}

impl<T: Into<Statement>> IntoBatch for Vec<T> {
    fn into_batch(self) -> Vec<Statement> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Statement>, const N: usize> IntoBatch for [T; N] {
    fn into_batch(self) -> Vec<Statement> {
        self.into_iter().map(Into::into).collect()
    }
}
