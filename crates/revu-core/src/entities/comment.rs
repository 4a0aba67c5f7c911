use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ActorRole, CommentType, ReviewAction};

/// A typed annotation on an item.
///
/// Immutable except for the resolution fields, which only `rejection`
/// comments ever acquire.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub item_id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_role: ActorRole,
    pub text: String,
    pub comment_type: CommentType,
    pub action_type: Option<ReviewAction>,
    pub related_status_change: Option<String>,
    pub mentions: Vec<String>,
    pub is_resolved: bool,
    pub resolved_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub parent_comment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
