use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ActorRole;

/// The actor on whose behalf a core operation runs.
///
/// Passed explicitly into every mutating call; the core keeps no
/// ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActorContext {
    pub user_id: String,
    pub name: String,
    pub role: ActorRole,
    /// `None` for platform-level actors without an organization.
    pub organization_id: Option<String>,
}

impl ActorContext {
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.role.is_internal()
    }

    /// Whether this actor belongs to `organization_id`.
    ///
    /// An item without an organization matches no external actor.
    #[must_use]
    pub fn belongs_to(&self, organization_id: Option<&str>) -> bool {
        match (self.organization_id.as_deref(), organization_id) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => false,
        }
    }
}
