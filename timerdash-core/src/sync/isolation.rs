// File: timerdash-core/src/sync/isolation.rs
//
// Per-fetch failure boundary. A failed slice becomes a Diagnostic; it never
// propagates into sibling fetches or out of the cycle.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use timerdash_common::FailureKind;

use super::{Diagnostic, Slice};
use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Ok(T),
    Failed(Diagnostic),
    /// Not attempted this cycle.
    Skipped,
}

impl<T> Fetched<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Fetched::Ok(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Fetched::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ok(&self) -> Option<&T> {
        match self {
            Fetched::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Fetched::Failed(diag) => Some(diag),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.diagnostic()
            .is_some_and(|d| d.kind == FailureKind::Unauthorized)
    }
}

impl Diagnostic {
    pub fn from_error(slice: Slice, error: &Error) -> Self {
        Self {
            slice,
            kind: error.failure_kind(),
            message: error.to_string(),
            at: Utc::now(),
        }
    }
}

pub async fn isolate<T, F>(slice: Slice, fetch: F) -> Fetched<T>
where
    F: Future<Output = Result<T, Error>>,
{
    match fetch.await {
        Ok(value) => {
            debug!("{} fetched", slice);
            Fetched::Ok(value)
        }
        Err(e) => {
            let diag = Diagnostic::from_error(slice, &e);
            warn!("Fetching {} failed ({:?}): {}", slice, diag.kind, diag.message);
            Fetched::Failed(diag)
        }
    }
}

/// [`isolate`] with an upper bound on how long the fetch may take.
pub async fn isolate_within<T, F>(slice: Slice, limit: Duration, fetch: F) -> Fetched<T>
where
    F: Future<Output = Result<T, Error>>,
{
    isolate(slice, async move {
        match tokio::time::timeout(limit, fetch).await {
            Ok(result) => result,
            Err(elapsed) => Err(Error::from(elapsed)),
        }
    })
    .await
}
