//! Shared foundation types: geometry, color, errors.

/// Core geometry and color types.
pub mod core;
/// Crate-wide error type and result alias.
pub mod error;
