use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AuditAction, ItemStatus};

/// An append-only audit log entry recording a transition or review action.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: String,
    pub review_cycle_id: Option<String>,
    pub item_id: String,
    pub action: AuditAction,
    pub action_by: String,
    pub action_by_name: String,
    pub previous_status: Option<ItemStatus>,
    pub new_status: Option<ItemStatus>,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
