//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid input at the edges of the model.
/// The resolver operations themselves never fail.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}
