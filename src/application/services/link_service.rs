//! Short link creation, resolution, and deletion service.
//!
//! This is the public surface of the link store. It owns target validation,
//! candidate code generation with bounded collision retry, TTL bookkeeping,
//! and lazy expiry on resolve. The repository underneath is the single point
//! of truth for code uniqueness.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::clock::Clock;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::{InsertError, LinkRepository};
use crate::error::LinkError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_normalizer::normalize_target;

/// Service mapping target URLs to short codes and back.
pub struct LinkService<R: LinkRepository> {
    repository: Arc<R>,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    max_create_attempts: usize,
}

impl<R: LinkRepository> LinkService<R> {
    /// Creates a new link service.
    ///
    /// `max_create_attempts` bounds the collision-retry loop in
    /// [`Self::create`]; it must be at least 1.
    pub fn new(
        repository: Arc<R>,
        generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        max_create_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            clock,
            max_create_attempts,
        }
    }

    /// Creates a new mapping and returns the stored link.
    ///
    /// The target is normalized before storage. When `ttl` is given the link
    /// expires `ttl` after creation; otherwise it never expires. Every call
    /// allocates a fresh code — the same target shortened twice yields two
    /// independent mappings.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidTarget`] - malformed URL or disallowed scheme
    /// - [`LinkError::InvalidTtl`] - zero or unrepresentable TTL
    /// - [`LinkError::AllocationExhausted`] - every candidate collided within
    ///   the retry bound; the code space is under pressure
    /// - [`LinkError::StorageUnavailable`] - backend failure, not retried
    pub async fn create(
        &self,
        target: &str,
        ttl: Option<Duration>,
    ) -> Result<ShortLink, LinkError> {
        let target = normalize_target(target)?;
        let created_at = self.clock.now();
        let expires_at = match ttl {
            Some(ttl) => Some(
                created_at
                    .checked_add_signed(validate_ttl(ttl)?)
                    .ok_or(LinkError::InvalidTtl)?,
            ),
            None => None,
        };

        for attempt in 1..=self.max_create_attempts {
            let link = ShortLink {
                code: self.generator.generate(),
                target: target.clone(),
                created_at,
                expires_at,
            };

            match self.repository.insert(link.clone(), created_at).await {
                Ok(()) => {
                    debug!(code = %link.code, attempt, "short code allocated");
                    return Ok(link);
                }
                Err(InsertError::CodeTaken) => {
                    warn!(code = %link.code, attempt, "short code collision, retrying");
                }
                Err(InsertError::Storage(err)) => return Err(err),
            }
        }

        // Every candidate collided: an operational alarm, not a client fault.
        error!(
            attempts = self.max_create_attempts,
            code_length = self.generator.code_length(),
            "short code space exhausted"
        );
        Err(LinkError::AllocationExhausted {
            attempts: self.max_create_attempts,
        })
    }

    /// Resolves a code to its target URL.
    ///
    /// An expired row is purged on the way out (lazy garbage collection), so
    /// a later resolve of the same code reports [`LinkError::NotFound`].
    ///
    /// # Errors
    ///
    /// - [`LinkError::NotFound`] - no row for this code
    /// - [`LinkError::Expired`] - the row existed but its TTL has lapsed
    /// - [`LinkError::StorageUnavailable`] - backend failure
    pub async fn resolve(&self, code: &str) -> Result<String, LinkError> {
        let Some(link) = self.repository.find_by_code(code).await? else {
            return Err(LinkError::NotFound);
        };

        let now = self.clock.now();
        if link.is_expired_at(now) {
            // Conditional removal: if the code was already reallocated to a
            // live row, that row stays.
            self.repository.purge_if_expired(code, now).await?;
            debug!(code, "resolved an expired code, row purged");
            return Err(LinkError::Expired);
        }

        Ok(link.target)
    }

    /// Deletes the mapping for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] when no row exists, so callers can
    /// tell a deletion apart from a no-op.
    pub async fn delete(&self, code: &str) -> Result<(), LinkError> {
        if self.repository.remove(code).await? {
            debug!(code, "short link deleted");
            Ok(())
        } else {
            Err(LinkError::NotFound)
        }
    }

    /// Removes every row whose TTL has lapsed; returns how many were removed.
    ///
    /// This is the active expiry path, normally driven by
    /// [`crate::domain::sweep_worker::run_sweep_worker`].
    pub async fn sweep(&self) -> Result<usize, LinkError> {
        self.repository.remove_expired(self.clock.now()).await
    }
}

/// Converts a positive std TTL into a chrono duration.
///
/// Rejects zero and durations too large for chrono; the caller additionally
/// checks that adding the result to the creation instant does not overflow
/// the timestamp range.
fn validate_ttl(ttl: Duration) -> Result<chrono::Duration, LinkError> {
    if ttl.is_zero() {
        return Err(LinkError::InvalidTtl);
    }
    chrono::Duration::from_std(ttl).map_err(|_| LinkError::InvalidTtl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::RandomCodeGenerator;
    use chrono::Utc;
    use mockall::predicate::*;

    fn service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(
            Arc::new(repo),
            Arc::new(RandomCodeGenerator::new(6)),
            Arc::new(ManualClock::starting_now()),
            5,
        )
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(1).returning(|_, _| Ok(()));

        let link = service(repo)
            .create("https://example.com/a", Some(Duration::from_secs(60)))
            .await
            .unwrap();

        assert_eq!(link.code.len(), 6);
        assert_eq!(link.target, "https://example.com/a");
        assert_eq!(
            link.expires_at.unwrap() - link.created_at,
            chrono::Duration::seconds(60)
        );
    }

    #[tokio::test]
    async fn test_create_without_ttl_never_expires() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(1).returning(|_, _| Ok(()));

        let link = service(repo)
            .create("https://example.com", None)
            .await
            .unwrap();

        assert!(link.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_create_retries_on_collision() {
        let mut repo = MockLinkRepository::new();
        let mut attempts = 0;
        repo.expect_insert().times(3).returning(move |_, _| {
            attempts += 1;
            if attempts < 3 {
                Err(InsertError::CodeTaken)
            } else {
                Ok(())
            }
        });

        let result = service(repo).create("https://example.com", None).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_allocation_exhausted() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .times(5)
            .returning(|_, _| Err(InsertError::CodeTaken));

        let err = service(repo)
            .create("https://example.com", None)
            .await
            .unwrap_err();

        assert!(matches!(err, LinkError::AllocationExhausted { attempts: 5 }));
    }

    #[tokio::test]
    async fn test_create_invalid_target_persists_nothing() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);

        let err = service(repo).create("not a url", None).await.unwrap_err();

        assert!(matches!(err, LinkError::InvalidTarget(_)));
    }

    #[tokio::test]
    async fn test_create_zero_ttl_rejected() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);

        let err = service(repo)
            .create("https://example.com", Some(Duration::ZERO))
            .await
            .unwrap_err();

        assert!(matches!(err, LinkError::InvalidTtl));
    }

    #[tokio::test]
    async fn test_create_ttl_past_timestamp_range_rejected() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);

        // Positive and chrono-representable, but lands past the maximum
        // timestamp; must error rather than panic on the date arithmetic.
        let err = service(repo)
            .create(
                "https://example.com",
                Some(Duration::from_secs(9_000_000_000_000_000)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, LinkError::InvalidTtl));
    }

    #[tokio::test]
    async fn test_create_storage_error_not_retried() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(1).returning(|_, _| {
            Err(InsertError::Storage(LinkError::StorageUnavailable(
                anyhow::anyhow!("disk on fire"),
            )))
        });

        let err = service(repo)
            .create("https://example.com", None)
            .await
            .unwrap_err();

        assert!(matches!(err, LinkError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn test_resolve_live_link() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .with(eq("abc123"))
            .times(1)
            .returning(|_| {
                Ok(Some(ShortLink {
                    code: "abc123".to_string(),
                    target: "https://example.com/".to_string(),
                    created_at: Utc::now(),
                    expires_at: None,
                }))
            });

        let target = service(repo).resolve("abc123").await.unwrap();

        assert_eq!(target, "https://example.com/");
    }

    #[tokio::test]
    async fn test_resolve_missing_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let err = service(repo).resolve("nope42").await.unwrap_err();

        assert!(matches!(err, LinkError::NotFound));
    }

    #[tokio::test]
    async fn test_resolve_expired_code_purges_row() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| {
            Ok(Some(ShortLink {
                code: "abc123".to_string(),
                target: "https://example.com/".to_string(),
                created_at: Utc::now() - chrono::Duration::hours(2),
                expires_at: Some(Utc::now() - chrono::Duration::hours(1)),
            }))
        });
        repo.expect_purge_if_expired()
            .with(eq("abc123"), always())
            .times(1)
            .returning(|_, _| Ok(true));

        let err = service(repo).resolve("abc123").await.unwrap_err();

        assert!(matches!(err, LinkError::Expired));
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let mut repo = MockLinkRepository::new();
        repo.expect_remove()
            .with(eq("abc123"))
            .times(1)
            .returning(|_| Ok(true));

        assert!(service(repo).delete("abc123").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_reports_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_remove().times(1).returning(|_| Ok(false));

        let err = service(repo).delete("nope42").await.unwrap_err();

        assert!(matches!(err, LinkError::NotFound));
    }

    #[tokio::test]
    async fn test_sweep_reports_removed_count() {
        let mut repo = MockLinkRepository::new();
        repo.expect_remove_expired().times(1).returning(|_| Ok(3));

        assert_eq!(service(repo).sweep().await.unwrap(), 3);
    }
}
