//! Workflow error types.

use revu_core::enums::{CommentType, ItemStatus, ReviewAction};
use revu_db::error::DatabaseError;
use thiserror::Error;

/// Errors from review workflow operations.
///
/// A transition that loses an optimistic-concurrency check is not an error;
/// see [`crate::workflow::TransitionResult::NotApplied`].
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The action is not legal from the item's current status.
    #[error("cannot {action} an item that is {from}")]
    InvalidTransition {
        action: ReviewAction,
        from: ItemStatus,
    },

    /// Resubmission is blocked by open rejection comments.
    #[error("{count} unresolved rejection comment(s) block resubmission")]
    UnresolvedRejections {
        count: usize,
        comment_ids: Vec<String>,
    },

    /// Authorization denied the operation.
    #[error("permission denied: {reason}")]
    PermissionDenied { reason: String },

    /// The justification comment for the action is missing or unsuitable.
    #[error("{action} requires a committed {required} comment on the item")]
    MissingJustification {
        action: ReviewAction,
        required: CommentType,
    },

    /// Only rejection comments carry resolution state.
    #[error("comment {0} is not a rejection comment and cannot be resolved")]
    CommentNotResolvable(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("metadata serialization failed: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error(transparent)]
    Persistence(#[from] DatabaseError),
}

/// Map `DatabaseError::NoResult` for a lookup by id to `NotFound`.
pub(crate) fn or_not_found<'a>(
    entity: &'static str,
    id: &'a str,
) -> impl FnOnce(DatabaseError) -> WorkflowError + 'a {
    move |e| match e {
        DatabaseError::NoResult => WorkflowError::NotFound {
            entity,
            id: id.to_string(),
        },
        other => WorkflowError::Persistence(other),
    }
}
