use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AssignmentStatus, AssignmentType};

/// A reviewer assigned to a review cycle. Immutable once superseded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewAssignment {
    pub id: String,
    pub review_cycle_id: String,
    pub item_id: String,
    pub assigned_reviewer_id: String,
    pub assigned_reviewer_name: String,
    pub assignment_type: AssignmentType,
    pub assigned_by: String,
    pub status: AssignmentStatus,
    pub assigned_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}
