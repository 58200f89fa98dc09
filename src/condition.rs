//! Tri-form SQL fragments and their normalization.
//!
//! A [`Condition`] is what callers hand to `find`, `update`, and `destroy` (and to `insert`
//! through [`InsertValues::Fragment`](crate::query_builder::InsertValues)). It is one of:
//!
//! - a raw string, used verbatim with no parameters,
//! - an explicit `(text, params)` pair,
//! - an ordered mapping of column to value, rendered as `col=?` clauses.
//!
//! ```rust
//! use sql_localstore::prelude::*;
//!
//! let keyed = Condition::keyed([("name", "John")]);
//! let out = normalize(Some(&keyed), Joiner::And)?;
//! assert_eq!(out.text.as_deref(), Some("name=?"));
//! assert_eq!(out.params, vec![RowValues::Text("John".into())]);
//! # Ok::<(), LocalStoreError>(())
//! ```

use indexmap::IndexMap;

use crate::error::LocalStoreError;
use crate::types::{IntoParams, RowValues};

/// A WHERE/SET/VALUES fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Literal SQL, zero parameters. No quoting or escaping is applied.
    Raw(String),
    /// Literal SQL with an explicit ordered parameter list.
    Paired(String, Vec<RowValues>),
    /// Column to value equalities, in insertion order.
    Keyed(IndexMap<String, RowValues>),
}

impl Condition {
    /// Literal SQL, used verbatim.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Condition::Raw(text.into())
    }

    /// Pair a fragment with its parameters. A single scalar is a one-element list.
    #[must_use]
    pub fn paired(text: impl Into<String>, params: impl IntoParams) -> Self {
        Condition::Paired(text.into(), params.into_params())
    }

    /// Build a keyed fragment from column to value pairs.
    ///
    /// # Arguments
    /// * `entries` - Column and value pairs; their order is the clause and parameter order
    ///
    /// # Returns
    /// * `Condition::Keyed` - Rendered later as `col=?` clauses
    #[must_use]
    pub fn keyed<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RowValues>,
    {
        Condition::Keyed(
            entries
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
    }
}

impl From<&str> for Condition {
    fn from(text: &str) -> Self {
        Condition::Raw(text.to_owned())
    }
}

impl From<String> for Condition {
    fn from(text: String) -> Self {
        Condition::Raw(text)
    }
}

impl From<IndexMap<String, RowValues>> for Condition {
    fn from(entries: IndexMap<String, RowValues>) -> Self {
        Condition::Keyed(entries)
    }
}

impl<S: Into<String>, P: IntoParams> From<(S, P)> for Condition {
    fn from((text, params): (S, P)) -> Self {
        Condition::paired(text, params)
    }
}

/// Separator placed between keyed clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    /// `" AND "`, for WHERE clauses.
    And,
    /// `", "`, for SET clauses.
    Comma,
}

impl Joiner {
    /// The separator text
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Joiner::And => " AND ",
            Joiner::Comma => ", ",
        }
    }
}

/// A normalized fragment. `text` is `None` when the clause should be omitted entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub text: Option<String>,
    pub params: Vec<RowValues>,
}

/// Normalize a fragment into clause text plus its ordered parameters.
///
/// An absent fragment, an empty mapping, blank raw text, and a blank pair without
/// parameters all yield `text == None`, so the caller omits the keyword.
///
/// # Arguments
/// * `fragment` - The fragment to normalize, if any
/// * `joiner` - Separator placed between keyed clauses
///
/// # Returns
/// * `Normalized` - Clause text plus parameters in placeholder order
///
/// # Errors
/// Returns [`LocalStoreError::BuildError`] for a pair with blank text but parameters,
/// since the parameters would have no placeholder to bind to.
pub fn normalize(
    fragment: Option<&Condition>,
    joiner: Joiner,
) -> Result<Normalized, LocalStoreError> {
    let Some(fragment) = fragment else {
        return Ok(Normalized::default());
    };

    let normalized = match fragment {
        Condition::Raw(text) => Normalized {
            text: non_blank(text),
            params: Vec::new(),
        },
        Condition::Paired(text, params) => {
            let text = non_blank(text);
            if text.is_none() && !params.is_empty() {
                return Err(LocalStoreError::BuildError(format!(
                    "fragment has no text for its {} parameters",
                    params.len()
                )));
            }
            Normalized {
                text,
                params: params.clone(),
            }
        }
        Condition::Keyed(entries) => {
            let mut clauses = Vec::with_capacity(entries.len());
            let mut params = Vec::with_capacity(entries.len());
            for (column, value) in entries {
                clauses.push(format!("{column}=?"));
                params.push(value.clone());
            }
            Normalized {
                text: (!clauses.is_empty()).then(|| clauses.join(joiner.as_str())),
                params,
            }
        }
    };
    Ok(normalized)
}

fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}
