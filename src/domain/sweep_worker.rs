//! Background sweep removing expired links.
//!
//! The active garbage-collection strategy: a periodic pass over the store
//! that bulk-removes rows whose TTL has lapsed. With the lazy strategy this
//! worker is simply never spawned and expiry is enforced on read instead.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Runs the sweep loop until the owning task is aborted.
///
/// Each tick removes every row expired as of a single sampled instant.
/// Failures are logged and the loop keeps going; a broken sweep must not
/// take resolution down with it.
pub async fn run_sweep_worker<R: LinkRepository>(service: Arc<LinkService<R>>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    // The first tick fires immediately; skip it so a fresh store is not swept
    // before anything could have expired.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        match service.sweep().await {
            Ok(0) => {}
            Ok(removed) => tracing::info!(removed, "sweep removed expired links"),
            Err(err) => tracing::warn!(error = %err, "sweep pass failed"),
        }
    }
}
