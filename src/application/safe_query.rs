//! Fail-soft execution of independent queries.
//!
//! Each query runs exactly once. Errors and panics are logged with the
//! caller's label and replaced by a default, so a broken query never takes
//! the surrounding page down with it.

use std::{any::Any, fmt::Display, future::Future, panic::AssertUnwindSafe};

use futures::FutureExt;
use tracing::{error, warn};

const SOURCE: &str = "zorpido::safe_query";

/// Result of one independently-failable query.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceOutcome<T> {
    /// The query succeeded and returned at least one row.
    Rows(Vec<T>),
    /// The query succeeded with no rows.
    Empty,
    /// The query failed; the failure has already been logged.
    Failed,
}

impl<T> Default for SliceOutcome<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> SliceOutcome<T> {
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Rows(rows)
        }
    }

    pub fn has_rows(&self) -> bool {
        matches!(self, Self::Rows(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Self::Rows(rows) => rows,
            Self::Empty | Self::Failed => &[],
        }
    }

    pub fn into_rows(self) -> Vec<T> {
        match self {
            Self::Rows(rows) => rows,
            Self::Empty | Self::Failed => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Await `query`; on error or panic log under `label` and return `default`.
pub async fn fail_soft<T, E, F>(label: &'static str, query: F, default: T) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match AssertUnwindSafe(query).catch_unwind().await {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            warn!(
                target = SOURCE,
                slice = label,
                error = %err,
                "query failed; using default"
            );
            default
        }
        Err(panic) => {
            error!(
                target = SOURCE,
                slice = label,
                panic = %panic_message(panic.as_ref()),
                "query panicked; using default"
            );
            default
        }
    }
}

/// Run a list query and classify it as rows, empty or failed.
pub async fn query_slice<T, E, F>(label: &'static str, query: F) -> SliceOutcome<T>
where
    F: Future<Output = Result<Vec<T>, E>>,
    E: Display,
{
    fail_soft(
        label,
        async move { query.await.map(SliceOutcome::from_rows) },
        SliceOutcome::Failed,
    )
    .await
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
