use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CycleStatus;

/// One pass of an item through the pending-review stage.
///
/// Cycles are never deleted. At most one `pending` cycle exists per item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewCycle {
    pub id: String,
    pub item_id: String,
    pub cycle_number: i64,
    pub status: CycleStatus,
    pub submitted_by: String,
    pub submitted_by_name: String,
    pub assigned_reviewer_id: Option<String>,
    pub assigned_reviewer_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}
