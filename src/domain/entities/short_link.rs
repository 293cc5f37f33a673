//! ShortLink entity representing a code to URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single short link row.
///
/// All fields are immutable after creation: updating a mapping means deleting
/// it and creating a new one, never editing in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    /// Primary key. Fixed length, drawn from the base62 alphabet.
    pub code: String,
    /// Normalized absolute URL the code resolves to.
    pub target: String,
    pub created_at: DateTime<Utc>,
    /// `None` means the link never expires. When set, strictly greater
    /// than `created_at`.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Returns true if the link's TTL has lapsed as of `now`.
    ///
    /// A link with no expiry is never expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(expires_at: Option<DateTime<Utc>>) -> ShortLink {
        ShortLink {
            code: "abc123".to_string(),
            target: "https://example.com/".to_string(),
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_link_without_expiry_never_expires() {
        let link = link(None);
        assert!(!link.is_expired_at(Utc::now() + Duration::days(10_000)));
    }

    #[test]
    fn test_link_live_before_expiry() {
        let now = Utc::now();
        let link = link(Some(now + Duration::seconds(60)));
        assert!(!link.is_expired_at(now));
        assert!(!link.is_expired_at(now + Duration::seconds(59)));
    }

    #[test]
    fn test_link_expired_at_and_after_expiry() {
        let now = Utc::now();
        let link = link(Some(now + Duration::seconds(60)));
        // Expiry boundary is inclusive: at exactly `expires_at` the link is gone.
        assert!(link.is_expired_at(now + Duration::seconds(60)));
        assert!(link.is_expired_at(now + Duration::seconds(61)));
    }
}
