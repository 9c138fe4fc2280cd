//! Domain error types.
//!
//! These errors represent invalid user input caught before any work is
//! done on a request. They are distinct from generator and transport errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Time budget is zero, negative, or not a number
    #[error("time budget must be a positive number of hours")]
    InvalidTimeBudget,

    /// Origin coordinates are out of range or not finite
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(&'static str),
}
