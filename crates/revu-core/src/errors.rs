//! Cross-cutting error types for revu.
//!
//! Domain-specific errors (`DatabaseError`, `WorkflowError`) live in their
//! respective crates. `anyhow` is reserved for the CLI edge.

use thiserror::Error;

/// Errors that can be raised by any revu crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A stored status string is not part of the item type's vocabulary.
    #[error("Unknown {item_type} status '{value}'")]
    UnknownStatus { item_type: String, value: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
