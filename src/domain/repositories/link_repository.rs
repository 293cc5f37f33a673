//! Repository trait for short link storage.

use crate::domain::entities::ShortLink;
use crate::error::LinkError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Outcome of an insert that lost the uniqueness race.
#[derive(Debug, Error)]
pub enum InsertError {
    /// A live row already holds this code. The caller should retry with a
    /// fresh candidate.
    #[error("short code is already taken")]
    CodeTaken,
    /// The storage medium failed; not a collision, not retried here.
    #[error(transparent)]
    Storage(#[from] LinkError),
}

/// Storage-medium contract for short link rows.
///
/// The repository is the single point of truth for code uniqueness: `insert`
/// must be indivisible so that two concurrent calls racing on the same code
/// can never both succeed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - concurrent in-memory backend
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Atomically inserts `link` if no live row holds its code.
    ///
    /// A row whose expiry has passed as of `now` does not block the insert;
    /// its code is considered free and the expired row is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::CodeTaken`] when a live row already owns the
    /// code, [`InsertError::Storage`] on backend failure.
    async fn insert(&self, link: ShortLink, now: DateTime<Utc>) -> Result<(), InsertError>;

    /// Point lookup by code.
    ///
    /// Returns the row whether or not it has expired; expiry policy is the
    /// caller's concern.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, LinkError>;

    /// Removes the row for `code`. Returns `true` if a row existed.
    async fn remove(&self, code: &str) -> Result<bool, LinkError>;

    /// Removes the row for `code` only if it is expired as of `now`.
    ///
    /// The expiry check and the removal are a single atomic step, so a code
    /// that was concurrently reallocated to a live row is left untouched.
    /// Returns `true` if an expired row was removed.
    async fn purge_if_expired(&self, code: &str, now: DateTime<Utc>) -> Result<bool, LinkError>;

    /// Removes every row whose expiry has passed as of `now`.
    ///
    /// Returns the number of rows removed. Safe to run concurrently with
    /// `insert` and `find_by_code`.
    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, LinkError>;
}
