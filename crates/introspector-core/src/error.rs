//! Error types for entity construction.

use thiserror::Error;

/// Failure signal returned when an entity cannot be constructed.
///
/// Callers are expected to skip the offending record rather than abort the
/// whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Neither a literal name nor a usable declaration key was provided.
    #[error("element has no name")]
    EmptyName,
}
