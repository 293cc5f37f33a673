//! Typed errors returned by the link store.
//!
//! Every variant is recoverable by the caller; embedding layers (HTTP, CLI)
//! are expected to translate these into their own status conventions.

use thiserror::Error;

/// Errors produced by link creation, resolution, and deletion.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The target URL is malformed or uses a disallowed scheme.
    /// The caller must fix the input before retrying.
    #[error("invalid target URL: {0}")]
    InvalidTarget(String),

    /// A TTL was supplied but is not a positive duration.
    #[error("time to live must be a positive duration")]
    InvalidTtl,

    /// The code has no corresponding row. Permanent for that code.
    #[error("short code not found")]
    NotFound,

    /// The code existed but its TTL has lapsed. Distinct from [`LinkError::NotFound`]
    /// so callers can tell "never existed" from "existed but lapsed"; becomes
    /// `NotFound` once the row is purged.
    #[error("short code has expired")]
    Expired,

    /// No free code was found within the retry bound. Signals code-space
    /// pressure: the whole `create` call may be retried, but a persistently
    /// failing store needs a longer code length.
    #[error("failed to allocate a free short code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// The storage backend could not serve the request. Not retried
    /// internally; surfaced as-is so the caller decides.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] anyhow::Error),
}
