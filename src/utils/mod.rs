//! Utility functions shared across the crate.
//!
//! - [`code_generator`] - Short code allocation strategies
//! - [`url_normalizer`] - Target URL validation and normalization

pub mod code_generator;
pub mod url_normalizer;
