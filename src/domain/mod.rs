//! Domain layer containing business entities and logic.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`sweep_worker`] - Background expiry sweep
//!
//! The domain layer has no dependencies on infrastructure concerns; repository
//! traits define contracts implemented by the infrastructure layer, and the
//! business logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
pub mod sweep_worker;
