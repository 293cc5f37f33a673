//! # shortlink-core
//!
//! The allocation and resolution engine behind a URL shortener: it maps long
//! URLs to short, unique codes and resolves them back, honoring an optional
//! per-mapping TTL.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - the [`ShortLink`](domain::entities::ShortLink)
//!   entity, the [`LinkRepository`](domain::repositories::LinkRepository)
//!   storage contract, and the background sweep worker
//! - **Application Layer** ([`application`]) - [`LinkService`](application::services::LinkService),
//!   the store's public verbs: `create`, `resolve`, `delete`, `sweep`
//! - **Infrastructure Layer** ([`infrastructure`]) - the concurrent in-memory
//!   repository backend
//!
//! HTTP routing, serialization formats, and any user-facing surface are the
//! embedding application's concern; this crate only returns typed results.
//!
//! ## Guarantees
//!
//! - At most one live mapping per code, even under concurrent creation: the
//!   repository insert is a single indivisible uniqueness check.
//! - Expired mappings are never resolved; they report
//!   [`LinkError::Expired`](error::LinkError::Expired) and are purged lazily
//!   on read or actively by the sweep, per configuration.
//! - Codes of expired rows are immediately reusable for new allocation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use shortlink_core::clock::SystemClock;
//! use shortlink_core::config;
//! use shortlink_core::infrastructure::persistence::MemoryLinkRepository;
//! use shortlink_core::application::services::LinkService;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = config::load_from_env()?;
//! let service = LinkService::new(
//!     Arc::new(MemoryLinkRepository::new()),
//!     config.code_generator(),
//!     Arc::new(SystemClock),
//!     config.max_create_attempts,
//! );
//!
//! let link = service.create("https://example.com/a", None).await?;
//! assert_eq!(service.resolve(&link.code).await?, "https://example.com/a");
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::LinkError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::{AllocationStrategy, Config, ExpiryStrategy};
    pub use crate::domain::entities::ShortLink;
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::LinkError;
    pub use crate::infrastructure::persistence::MemoryLinkRepository;
}
