//! Concurrent in-memory implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{InsertError, LinkRepository};
use crate::error::LinkError;

/// Sharded in-memory store of code to link rows.
///
/// Built on `DashMap`, so lookups and inserts on unrelated codes never
/// contend on a global lock. The uniqueness guarantee comes from the entry
/// API: the vacancy check and the write happen under one shard lock.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, ShortLink>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
        }
    }

    /// Number of rows currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if no rows are held.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, link: ShortLink, now: DateTime<Utc>) -> Result<(), InsertError> {
        match self.links.entry(link.code.clone()) {
            Entry::Occupied(mut occupied) => {
                // An expired occupant no longer counts against uniqueness;
                // its code is reusable.
                if occupied.get().is_expired_at(now) {
                    occupied.insert(link);
                    Ok(())
                } else {
                    Err(InsertError::CodeTaken)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(link);
                Ok(())
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, LinkError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn remove(&self, code: &str) -> Result<bool, LinkError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn purge_if_expired(&self, code: &str, now: DateTime<Utc>) -> Result<bool, LinkError> {
        // remove_if re-checks under the shard lock, so a code that was
        // reallocated to a live row in the meantime survives.
        Ok(self
            .links
            .remove_if(code, |_, link| link.is_expired_at(now))
            .is_some())
    }

    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, LinkError> {
        // Collect candidates first: removing while iterating would hold two
        // shard locks at once.
        let candidates: Vec<String> = self
            .links
            .iter()
            .filter(|entry| entry.value().is_expired_at(now))
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = 0;
        for code in candidates {
            if self
                .links
                .remove_if(&code, |_, link| link.is_expired_at(now))
                .is_some()
            {
                removed += 1;
            }
        }

        Ok(removed)
    }
}
