//! Collection data model types and field validation.
//!
//! This crate defines the records kept by the collector store (stamps, catalog
//! entries, physical holdings) without any database dependency. Consumers can
//! use these types directly for display or serialization, or hand them to
//! `collector-db` for persistence.

pub mod error;
pub mod price;
pub mod types;

pub use error::ValidationError;
pub use price::Price;
pub use types::*;
