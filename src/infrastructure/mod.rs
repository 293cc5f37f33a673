//! Infrastructure layer implementing the contracts defined by the domain.
//!
//! - [`persistence`] - Storage backends for short link rows

pub mod persistence;
