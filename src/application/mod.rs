//! Application layer services implementing business logic.
//!
//! Services consume the repository traits defined by the domain layer and
//! expose the store's public verbs to whatever outer layer embeds this crate.

pub mod services;
