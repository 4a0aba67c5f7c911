//! Role policy used by the CLI as its authorization collaborator.

use revu_core::enums::{ActorRole, ReviewAction};
use revu_engine::authz::{AuthzDecision, AuthzRequest, Authorizer, Permission};

/// Static role matrix. Organization scoping is enforced by the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

const fn allowed_roles(permission: Permission) -> &'static [ActorRole] {
    use ActorRole::{Admin, OrgAdmin, Reviewer, Submitter};
    match permission {
        Permission::Transition(ReviewAction::Submit | ReviewAction::Resubmit) => {
            &[Admin, OrgAdmin, Submitter]
        }
        Permission::Transition(
            ReviewAction::Approve | ReviewAction::Reject | ReviewAction::SendBack,
        ) => &[Admin, Reviewer, OrgAdmin],
        Permission::Transition(ReviewAction::Unpublish | ReviewAction::Archive) => {
            &[Admin, OrgAdmin]
        }
        Permission::Transition(ReviewAction::Restore) | Permission::Reassign => &[Admin],
        Permission::Comment | Permission::ResolveComment => {
            &[Admin, Reviewer, OrgAdmin, Submitter]
        }
    }
}

impl Authorizer for RolePolicy {
    fn authorize(&self, request: &AuthzRequest<'_>) -> AuthzDecision {
        if allowed_roles(request.permission).contains(&request.actor_role) {
            return AuthzDecision::Allow;
        }
        let what = match request.permission {
            Permission::Transition(action) => format!("{action} a {} item", request.subject),
            Permission::Comment => "comment".to_string(),
            Permission::ResolveComment => "resolve comments".to_string(),
            Permission::Reassign => "reassign reviewers".to_string(),
        };
        AuthzDecision::Deny {
            reason: format!("role {} may not {what}", request.actor_role),
        }
    }
}
