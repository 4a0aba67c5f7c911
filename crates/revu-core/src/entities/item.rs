use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ItemStatus, ItemType};

/// A record subject to review: content, a marketplace listing, or a business entry.
///
/// `status` is always canonical here; the per-type stored vocabulary is
/// translated at the persistence edge (see [`crate::vocab`]).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewableItem {
    pub id: String,
    pub item_type: ItemType,
    pub organization_id: Option<String>,
    pub title: String,
    pub status: ItemStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
