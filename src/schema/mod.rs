//! Schema module for cinedex.
//!
//! This module provides field mappings, the per-index [`Schema`] and the
//! [`SchemaRegistry`] that the index store consults when validating
//! documents.

pub mod field;
pub mod registry;
#[allow(clippy::module_inception)]
pub mod schema;

// Re-export commonly used types
pub use field::FieldMapping;
pub use registry::SchemaRegistry;
pub use schema::{Schema, SchemaBuilder};
