use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ActorRole;

/// A reviewer eligible for assignment, with live workload. Derived, not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewerCandidate {
    pub user_id: String,
    pub name: String,
    pub role: ActorRole,
    pub organization_id: Option<String>,
    /// Count of assignments in `assigned`, `accepted`, or `in_progress`.
    pub workload: u32,
    /// Latest `assigned_at` across those assignments; `None` if never assigned.
    pub last_assigned_at: Option<DateTime<Utc>>,
}
