use std::sync::{Arc, OnceLock};

use tokio::sync::watch;

use super::{ResultSet, Row};
use crate::error::LocalStoreError;
use crate::types::Status;

#[derive(Debug)]
struct Shared {
    rows: OnceLock<ResultSet>,
    status: watch::Sender<Status>,
}

/// An indexable view over rows that arrive after the view is handed out.
///
/// A view starts [`Status::Empty`] and moves to [`Status::Ready`] exactly once, when the
/// engine delivers its result set. Clones share the same underlying state.
///
/// ```rust
/// use sql_localstore::prelude::*;
///
/// let view = LazyResultView::create();
/// assert_eq!(view.status(), Status::Empty);
/// assert_eq!(view.length(), 0);
/// assert!(view.at(0).is_none());
/// assert_eq!(view.iter().count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct LazyResultView {
    shared: Arc<Shared>,
}

impl Default for LazyResultView {
    fn default() -> Self {
        Self::create()
    }
}

impl LazyResultView {
    #[must_use]
    pub fn create() -> Self {
        let (status, _) = watch::channel(Status::Empty);
        Self {
            shared: Arc::new(Shared {
                rows: OnceLock::new(),
                status,
            }),
        }
    }

    #[must_use]
    pub fn status(&self) -> Status {
        if self.shared.rows.get().is_some() {
            Status::Ready
        } else {
            Status::Empty
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status() == Status::Ready
    }

    /// Number of rows; `0` while empty.
    #[must_use]
    pub fn length(&self) -> usize {
        self.shared.rows.get().map_or(0, ResultSet::len)
    }

    /// Row at `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - Zero-based row position
    ///
    /// # Returns
    ///
    /// The row, or None while the view is empty or when `index >= length()`
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Row> {
        self.shared.rows.get().and_then(|rows| rows.row(index))
    }

    /// The delivered result set, once ready.
    #[must_use]
    pub fn rows(&self) -> Option<&ResultSet> {
        self.shared.rows.get()
    }

    /// Rows in index order. Yields nothing while empty.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.shared
            .rows
            .get()
            .map(|rows| rows.results.as_slice())
            .unwrap_or_default()
            .iter()
    }

    /// Watch the status. The receiver observes the single `Empty -> Ready` transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.shared.status.subscribe()
    }

    /// Resolves once the view is ready; immediately if it already is.
    ///
    /// A view whose statement failed, or was never submitted, stays [`Status::Empty`] and
    /// this future never resolves. Wrap it in a timeout when the outcome is uncertain.
    pub async fn ready(&self) {
        let mut status = self.shared.status.subscribe();
        // The sender lives as long as `self`, so waiting cannot fail.
        let _ = status.wait_for(|status| *status == Status::Ready).await;
    }

    /// Deliver the rows and publish `Ready`.
    ///
    /// # Errors
    /// Returns [`LocalStoreError::AlreadyPopulated`] on a second call; the first rows stay.
    pub(crate) fn populate(&self, rows: ResultSet) -> Result<(), LocalStoreError> {
        if self.shared.rows.set(rows).is_err() {
            tracing::warn!("ignoring rows delivered to an already populated result view");
            return Err(LocalStoreError::AlreadyPopulated);
        }
        self.shared.status.send_replace(Status::Ready);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a LazyResultView {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
