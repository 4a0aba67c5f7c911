use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ActorRole;
use crate::identity::ActorContext;

/// A directory user. Internal roles form the reviewer pool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: ActorRole,
    pub organization_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Actor context for calls made on behalf of this user.
    #[must_use]
    pub fn actor(&self) -> ActorContext {
        ActorContext {
            user_id: self.id.clone(),
            name: self.name.clone(),
            role: self.role,
            organization_id: self.organization_id.clone(),
        }
    }
}
