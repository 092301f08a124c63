//! Composition document and builders.

/// Fluent builders.
pub mod builder;
/// Serializable composition model.
pub mod model;
