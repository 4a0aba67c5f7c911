//! Authorization seam.
//!
//! The engine consumes allow/deny decisions and never computes them. A deny
//! is a hard stop for the operation.

use serde::Serialize;

use revu_core::enums::{ActorRole, ItemType, ReviewAction};

/// What the actor is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "action", rename_all = "snake_case")]
pub enum Permission {
    Transition(ReviewAction),
    Comment,
    ResolveComment,
    Reassign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthzRequest<'a> {
    pub actor_role: ActorRole,
    pub actor_org: Option<&'a str>,
    pub permission: Permission,
    pub subject: ItemType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzDecision {
    Allow,
    Deny { reason: String },
}

/// External authorization collaborator.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, request: &AuthzRequest<'_>) -> AuthzDecision;
}
