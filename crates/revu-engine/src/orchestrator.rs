//! Review orchestrator: the entry point for UI and API callers.
//!
//! Sequences authorization, the justification comment for reject/send-back,
//! the transition, and notifications. A comment that fails to commit aborts
//! the operation before any status change; a transition that fails after its
//! comment committed is reported as [`TransitionFailure::CommentRecordedStatusUnchanged`].

use serde::Serialize;

use revu_core::entities::{Comment, ReviewAssignment, ReviewableItem, ReviewerCandidate};
use revu_core::enums::{AuditAction, CommentType, ItemStatus, ReviewAction};
use revu_core::identity::ActorContext;

use crate::audit_log::AuditView;
use crate::authz::{AuthzDecision, AuthzRequest, Authorizer, Permission};
use crate::comments::CommentDraft;
use crate::error::or_not_found;
use crate::notify::{Notifier, NotifyLevel};
use crate::workflow::{TransitionRequest, TransitionResult, check_organization};
use crate::{ReviewService, WorkflowError};

/// User-facing outcome of [`ReviewOrchestrator::transition`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransitionResponse {
    pub applied: bool,
    /// Item status after the call, when known.
    pub new_status: Option<ItemStatus>,
    /// Justification comment recorded by this call.
    pub comment_id: Option<String>,
    pub error: Option<TransitionFailure>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionFailure {
    NotFound {
        message: String,
    },
    InvalidTransition {
        action: ReviewAction,
        from: ItemStatus,
    },
    /// Someone else changed the item first. Refresh and decide again.
    ConcurrentModification {
        current: ItemStatus,
    },
    UnresolvedRejections {
        count: usize,
        comment_ids: Vec<String>,
    },
    PermissionDenied {
        reason: String,
    },
    Validation {
        message: String,
    },
    /// The justification comment exists but the status did not change;
    /// retrying the transition alone is safe.
    CommentRecordedStatusUnchanged {
        comment_id: String,
        message: String,
    },
    /// Infrastructure failure. Details are logged, not surfaced.
    Unavailable,
}

impl TransitionFailure {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { message }
            | Self::Validation { message }
            | Self::CommentRecordedStatusUnchanged { message, .. } => message.clone(),
            Self::InvalidTransition { action, from } => {
                format!("cannot {action} an item that is {from}")
            }
            Self::ConcurrentModification { current } => {
                format!("item was changed by someone else and is now {current}")
            }
            Self::UnresolvedRejections { count, .. } => {
                format!("{count} rejection comment(s) must be resolved before resubmitting")
            }
            Self::PermissionDenied { reason } => reason.clone(),
            Self::Unavailable => "the review service is unavailable, try again".to_string(),
        }
    }
}

impl From<WorkflowError> for TransitionFailure {
    fn from(error: WorkflowError) -> Self {
        match error {
            WorkflowError::NotFound { .. } => Self::NotFound {
                message: error.to_string(),
            },
            WorkflowError::InvalidTransition { action, from } => {
                Self::InvalidTransition { action, from }
            }
            WorkflowError::UnresolvedRejections { count, comment_ids } => {
                Self::UnresolvedRejections { count, comment_ids }
            }
            WorkflowError::PermissionDenied { reason } => Self::PermissionDenied { reason },
            WorkflowError::MissingJustification { .. }
            | WorkflowError::CommentNotResolvable(_)
            | WorkflowError::Validation(_) => Self::Validation {
                message: error.to_string(),
            },
            WorkflowError::Metadata(_) | WorkflowError::Persistence(_) => {
                tracing::error!(%error, "review operation failed");
                Self::Unavailable
            }
        }
    }
}

impl TransitionResponse {
    fn failed(error: TransitionFailure, new_status: Option<ItemStatus>) -> Self {
        Self {
            applied: false,
            new_status,
            comment_id: None,
            error: Some(error),
        }
    }
}

/// Facade over [`ReviewService`] with authorization and notification seams.
pub struct ReviewOrchestrator<A, N> {
    service: ReviewService,
    authorizer: A,
    notifier: N,
}

impl<A: Authorizer, N: Notifier> ReviewOrchestrator<A, N> {
    pub const fn new(service: ReviewService, authorizer: A, notifier: N) -> Self {
        Self {
            service,
            authorizer,
            notifier,
        }
    }

    #[must_use]
    pub const fn service(&self) -> &ReviewService {
        &self.service
    }

    fn authorize(
        &self,
        actor: &ActorContext,
        permission: Permission,
        subject: &ReviewableItem,
    ) -> Result<(), WorkflowError> {
        let request = AuthzRequest {
            actor_role: actor.role,
            actor_org: actor.organization_id.as_deref(),
            permission,
            subject: subject.item_type,
        };
        match self.authorizer.authorize(&request) {
            AuthzDecision::Allow => Ok(()),
            AuthzDecision::Deny { reason } => {
                tracing::warn!(?permission, %reason, "authorization denied");
                Err(WorkflowError::PermissionDenied { reason })
            }
        }
    }

    async fn load_item(&self, item_id: &str) -> Result<ReviewableItem, WorkflowError> {
        self.service
            .db()
            .get_item(item_id)
            .await
            .map_err(or_not_found("item", item_id))
    }

    /// Apply `action` to the item as it currently stands.
    pub async fn transition(
        &self,
        actor: &ActorContext,
        item_id: &str,
        action: ReviewAction,
        note: Option<&str>,
    ) -> TransitionResponse {
        self.transition_from(actor, item_id, action, None, note).await
    }

    /// Apply `action` expecting the item to be in `expected` (the status the
    /// caller displayed). `None` uses the status read at the start of the call.
    ///
    /// For reject and send-back, `note` is required and is committed as the
    /// justification comment before the transition is attempted. A stale
    /// `expected` or an organization mismatch is reported before anything is
    /// written.
    #[tracing::instrument(skip(self, actor, note), fields(actor = %actor.user_id))]
    pub async fn transition_from(
        &self,
        actor: &ActorContext,
        item_id: &str,
        action: ReviewAction,
        expected: Option<ItemStatus>,
        note: Option<&str>,
    ) -> TransitionResponse {
        let item = match self.load_item(item_id).await {
            Ok(item) => item,
            Err(e) => return self.fail(e.into(), None),
        };
        if let Err(e) = self.authorize(actor, Permission::Transition(action), &item) {
            return self.fail(e.into(), Some(item.status));
        }

        let expected = expected.unwrap_or(item.status);
        let Some(target) = action.apply(expected) else {
            let failure = TransitionFailure::InvalidTransition {
                action,
                from: expected,
            };
            return self.fail(failure, Some(item.status));
        };
        if expected != item.status {
            let failure = TransitionFailure::ConcurrentModification {
                current: item.status,
            };
            return self.fail(failure, Some(item.status));
        }
        if let Err(e) = check_organization(actor, &item, action) {
            return self.fail(e.into(), Some(item.status));
        }
        let note = note.map(str::trim).filter(|n| !n.is_empty());

        let mut request = TransitionRequest::new(&item.id, action, expected);
        let mut comment_id = None;
        if let Some(required) = action.required_comment() {
            let Some(text) = note else {
                let failure = TransitionFailure::Validation {
                    message: format!("{action} requires a note explaining why"),
                };
                return self.fail(failure, Some(item.status));
            };
            let comment = match self
                .record_justification(actor, &item, action, required, text, expected, target)
                .await
            {
                Ok(comment) => comment,
                Err(e) => return self.fail(e.into(), Some(item.status)),
            };
            request = request.with_comment(&comment.id).with_reason(text);
            comment_id = Some(comment.id);
        } else if let Some(text) = note {
            request = request.with_notes(text);
        }

        let outcome = self.service.transition(actor, request).await;
        self.respond(&item, action, comment_id, outcome).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn record_justification(
        &self,
        actor: &ActorContext,
        item: &ReviewableItem,
        action: ReviewAction,
        comment_type: CommentType,
        text: &str,
        from: ItemStatus,
        to: ItemStatus,
    ) -> Result<Comment, WorkflowError> {
        self.service
            .submit_comment(
                actor,
                &item.id,
                CommentDraft {
                    action_type: Some(action),
                    related_status_change: Some(format!("{from}->{to}")),
                    ..CommentDraft::new(text).with_type(comment_type)
                },
            )
            .await
    }

    async fn respond(
        &self,
        item: &ReviewableItem,
        action: ReviewAction,
        comment_id: Option<String>,
        outcome: Result<TransitionResult, WorkflowError>,
    ) -> TransitionResponse {
        let label = AuditAction::from(action).label();
        let failure = match outcome {
            Ok(TransitionResult::Applied(applied)) => {
                self.notifier.notify(label, NotifyLevel::Success);
                return TransitionResponse {
                    applied: true,
                    new_status: Some(applied.status),
                    comment_id,
                    error: None,
                };
            }
            Ok(TransitionResult::NotApplied { current, .. }) => match &comment_id {
                Some(id) => TransitionFailure::CommentRecordedStatusUnchanged {
                    comment_id: id.clone(),
                    message: format!("comment saved, but the item is now {current}; retry the action"),
                },
                None => TransitionFailure::ConcurrentModification { current },
            },
            Err(e) => {
                let unchanged = comment_id.is_some() && self.status_unchanged(item).await;
                match &comment_id {
                    Some(id) if unchanged => {
                        tracing::error!(error = %e, "transition failed after its comment was recorded");
                        TransitionFailure::CommentRecordedStatusUnchanged {
                            comment_id: id.clone(),
                            message: format!(
                                "comment saved, but {label} did not complete; retry the action"
                            ),
                        }
                    }
                    _ => e.into(),
                }
            }
        };

        let new_status = self
            .service
            .db()
            .get_item(&item.id)
            .await
            .ok()
            .map(|i| i.status);
        let mut response = self.fail(failure, new_status);
        response.comment_id = comment_id;
        response
    }

    async fn status_unchanged(&self, item: &ReviewableItem) -> bool {
        self.service
            .db()
            .get_item(&item.id)
            .await
            .is_ok_and(|current| current.status == item.status)
    }

    fn fail(&self, failure: TransitionFailure, new_status: Option<ItemStatus>) -> TransitionResponse {
        let level = match failure {
            TransitionFailure::ConcurrentModification { .. }
            | TransitionFailure::CommentRecordedStatusUnchanged { .. } => NotifyLevel::Warning,
            _ => NotifyLevel::Error,
        };
        self.notifier.notify(&failure.message(), level);
        TransitionResponse::failed(failure, new_status)
    }

    pub async fn submit_comment(
        &self,
        actor: &ActorContext,
        item_id: &str,
        draft: CommentDraft,
    ) -> Result<Comment, WorkflowError> {
        let item = self.load_item(item_id).await?;
        self.authorize(actor, Permission::Comment, &item)?;
        self.service.submit_comment(actor, item_id, draft).await
    }

    pub async fn resolve_comment(
        &self,
        actor: &ActorContext,
        comment_id: &str,
    ) -> Result<bool, WorkflowError> {
        let comment = self
            .service
            .db()
            .get_comment(comment_id)
            .await
            .map_err(or_not_found("comment", comment_id))?;
        let item = self.load_item(&comment.item_id).await?;
        self.authorize(actor, Permission::ResolveComment, &item)?;
        let resolved = self.service.resolve_comment(actor, comment_id).await?;
        if resolved && !comment.is_resolved {
            self.notifier.notify("Comment resolved", NotifyLevel::Success);
        }
        Ok(resolved)
    }

    pub async fn list_comments(&self, item_id: &str) -> Result<Vec<Comment>, WorkflowError> {
        self.service.list_comments(item_id).await
    }

    /// Zero-based page of the item's audit log, newest first.
    pub async fn list_audit_log(
        &self,
        item_id: &str,
        page: u32,
    ) -> Result<Vec<AuditView>, WorkflowError> {
        self.service.list_audit_page(item_id, page).await
    }

    pub async fn get_reviewer_assignment(
        &self,
        item_id: &str,
    ) -> Result<Option<ReviewAssignment>, WorkflowError> {
        self.service.current_assignment(item_id).await
    }

    pub async fn list_eligible_reviewers(
        &self,
        organization_id: Option<&str>,
    ) -> Result<Vec<ReviewerCandidate>, WorkflowError> {
        self.service.find_eligible_reviewers(organization_id).await
    }

    /// Move the item's open cycle to `reviewer_id`.
    ///
    /// Returns `false` if the item has no open cycle.
    ///
    /// # Errors
    ///
    /// `Validation` if the reviewer is inactive or not an internal reviewer.
    pub async fn reassign(
        &self,
        actor: &ActorContext,
        item_id: &str,
        reviewer_id: &str,
    ) -> Result<bool, WorkflowError> {
        let item = self.load_item(item_id).await?;
        self.authorize(actor, Permission::Reassign, &item)?;

        let reviewer = self
            .service
            .db()
            .get_user(reviewer_id)
            .await
            .map_err(or_not_found("user", reviewer_id))?;
        if !reviewer.is_active || !reviewer.role.is_internal() {
            return Err(WorkflowError::Validation(format!(
                "{reviewer_id} is not an active reviewer"
            )));
        }

        let Some(cycle) = self.service.db().get_open_cycle(&item.id).await? else {
            self.notifier
                .notify("Item has no open review to reassign", NotifyLevel::Warning);
            return Ok(false);
        };
        let reassigned = self
            .service
            .reassign(&cycle.id, &reviewer.id, &reviewer.name, actor)
            .await?;
        if reassigned {
            self.notifier.notify(
                &format!("Reassigned to {}", reviewer.name),
                NotifyLevel::Success,
            );
        } else {
            self.notifier
                .notify("Reassignment did not take effect; refresh", NotifyLevel::Warning);
        }
        Ok(reassigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        AllowAll, DenyAll, RecordingNotifier, actor, force_status, seed_item, seed_user,
        test_service,
    };
    use pretty_assertions::assert_eq;
    use revu_core::enums::{ActorRole, ItemType};

    async fn orchestrator() -> ReviewOrchestrator<AllowAll, RecordingNotifier> {
        ReviewOrchestrator::new(test_service().await, AllowAll, RecordingNotifier::default())
    }

    #[tokio::test]
    async fn reject_commits_comment_then_transitions() {
        let orch = orchestrator().await;
        let item = seed_item(orch.service(), ItemType::Content, None).await;
        force_status(orch.service(), &item, ItemStatus::PendingReview).await;
        let rita = actor(ActorRole::Reviewer, None);

        let response = orch
            .transition(&rita, &item.id, ReviewAction::Reject, Some("missing licence @sam"))
            .await;
        assert!(response.applied, "{response:?}");
        assert_eq!(response.new_status, Some(ItemStatus::Rejected));

        let comments = orch.list_comments(&item.id).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(Some(comments[0].id.clone()), response.comment_id);
        assert_eq!(comments[0].comment_type, CommentType::Rejection);
        assert_eq!(comments[0].mentions, vec!["sam"]);
        assert_eq!(
            comments[0].related_status_change.as_deref(),
            Some("pending_review->rejected")
        );

        let audit = orch.list_audit_log(&item.id, 0).await.unwrap();
        assert_eq!(audit[0].entry.reason.as_deref(), Some("missing licence @sam"));
        assert_eq!(orch.notifier.levels(), vec![NotifyLevel::Success]);
    }

    #[tokio::test]
    async fn send_back_without_note_writes_nothing() {
        let orch = orchestrator().await;
        let item = seed_item(orch.service(), ItemType::Content, None).await;
        force_status(orch.service(), &item, ItemStatus::PendingReview).await;

        let response = orch
            .transition(&actor(ActorRole::Reviewer, None), &item.id, ReviewAction::SendBack, Some("  "))
            .await;
        assert!(!response.applied);
        assert!(matches!(response.error, Some(TransitionFailure::Validation { .. })));
        assert!(orch.list_comments(&item.id).await.unwrap().is_empty());
        assert_eq!(response.new_status, Some(ItemStatus::PendingReview));
    }

    #[tokio::test]
    async fn illegal_action_is_reported_before_any_comment() {
        let orch = orchestrator().await;
        let item = seed_item(orch.service(), ItemType::Content, None).await;

        let response = orch
            .transition(&actor(ActorRole::Reviewer, None), &item.id, ReviewAction::Reject, Some("no"))
            .await;
        assert_eq!(
            response.error,
            Some(TransitionFailure::InvalidTransition {
                action: ReviewAction::Reject,
                from: ItemStatus::Draft,
            })
        );
        assert!(orch.list_comments(&item.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stale_view_is_reported_before_any_comment() {
        let orch = orchestrator().await;
        let item = seed_item(orch.service(), ItemType::Content, None).await;

        let response = orch
            .transition_from(
                &actor(ActorRole::Reviewer, None),
                &item.id,
                ReviewAction::Reject,
                Some(ItemStatus::PendingReview),
                Some("not good enough"),
            )
            .await;

        assert!(!response.applied);
        assert_eq!(response.new_status, Some(ItemStatus::Draft));
        assert_eq!(
            response.error,
            Some(TransitionFailure::ConcurrentModification {
                current: ItemStatus::Draft
            })
        );
        assert_eq!(response.comment_id, None);
        assert!(orch.list_comments(&item.id).await.unwrap().is_empty());
        assert_eq!(orch.notifier.levels(), vec![NotifyLevel::Warning]);
    }

    #[tokio::test]
    async fn outsider_reject_leaves_no_blocking_comment() {
        let orch = orchestrator().await;
        let svc = orch.service();
        let item = seed_item(svc, ItemType::Business, Some("org-a")).await;
        force_status(svc, &item, ItemStatus::PendingReview).await;

        let outsider = actor(ActorRole::OrgAdmin, Some("org-b"));
        let response = orch
            .transition(&outsider, &item.id, ReviewAction::Reject, Some("we object"))
            .await;
        assert!(matches!(
            response.error,
            Some(TransitionFailure::PermissionDenied { .. })
        ));
        assert_eq!(response.comment_id, None);
        assert!(!svc.has_unresolved_rejections(&item.id).await.unwrap());

        let rita = actor(ActorRole::Reviewer, None);
        let rejected = orch
            .transition(&rita, &item.id, ReviewAction::Reject, Some("licence expired"))
            .await;
        assert!(rejected.applied, "{rejected:?}");
        orch.resolve_comment(&rita, &rejected.comment_id.unwrap())
            .await
            .unwrap();

        let insider = actor(ActorRole::OrgAdmin, Some("org-a"));
        let resubmitted = orch
            .transition(&insider, &item.id, ReviewAction::Resubmit, None)
            .await;
        assert!(resubmitted.applied, "{resubmitted:?}");
        assert_eq!(resubmitted.new_status, Some(ItemStatus::PendingReview));
    }

    async fn fail_on(svc: &ReviewService, trigger: &str) {
        svc.db().conn().execute(trigger, ()).await.unwrap();
    }

    const STATUS_WRITES_FAIL: &str = "CREATE TRIGGER items_status_offline \
        BEFORE UPDATE OF status ON items \
        BEGIN SELECT RAISE(ABORT, 'storage offline'); END";

    const AUDIT_WRITES_FAIL: &str = "CREATE TRIGGER audit_offline \
        BEFORE INSERT ON audit_log \
        BEGIN SELECT RAISE(ABORT, 'storage offline'); END";

    #[tokio::test]
    async fn failed_status_write_after_comment_reports_partial_state() {
        let orch = orchestrator().await;
        let item = seed_item(orch.service(), ItemType::Content, None).await;
        force_status(orch.service(), &item, ItemStatus::PendingReview).await;
        fail_on(orch.service(), STATUS_WRITES_FAIL).await;

        let response = orch
            .transition(&actor(ActorRole::Reviewer, None), &item.id, ReviewAction::Reject, Some("no"))
            .await;

        assert!(!response.applied);
        assert_eq!(response.new_status, Some(ItemStatus::PendingReview));
        let comment_id = response.comment_id.clone().unwrap();
        assert!(matches!(
            response.error,
            Some(TransitionFailure::CommentRecordedStatusUnchanged { comment_id: ref id, .. }) if *id == comment_id
        ));
        let comments = orch.list_comments(&item.id).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, comment_id);
        assert_eq!(orch.notifier.levels(), vec![NotifyLevel::Warning]);
    }

    #[tokio::test]
    async fn failed_status_write_without_comment_is_unavailable() {
        let orch = orchestrator().await;
        let item = seed_item(orch.service(), ItemType::Content, None).await;
        force_status(orch.service(), &item, ItemStatus::PendingReview).await;
        fail_on(orch.service(), STATUS_WRITES_FAIL).await;

        let response = orch
            .transition(&actor(ActorRole::Reviewer, None), &item.id, ReviewAction::Approve, None)
            .await;

        assert_eq!(response.error, Some(TransitionFailure::Unavailable));
        assert_eq!(response.comment_id, None);
        assert_eq!(response.new_status, Some(ItemStatus::PendingReview));
        assert_eq!(orch.notifier.levels(), vec![NotifyLevel::Error]);
    }

    #[tokio::test]
    async fn failure_after_status_changed_is_unavailable_not_partial() {
        let orch = orchestrator().await;
        let item = seed_item(orch.service(), ItemType::Content, None).await;
        force_status(orch.service(), &item, ItemStatus::PendingReview).await;
        fail_on(orch.service(), AUDIT_WRITES_FAIL).await;

        let response = orch
            .transition(&actor(ActorRole::Reviewer, None), &item.id, ReviewAction::Reject, Some("no"))
            .await;

        assert!(!response.applied);
        assert_eq!(response.error, Some(TransitionFailure::Unavailable));
        assert!(response.comment_id.is_some());
        assert_eq!(response.new_status, Some(ItemStatus::Rejected));
        assert_eq!(orch.notifier.levels(), vec![NotifyLevel::Error]);
    }

    #[tokio::test]
    async fn concurrent_change_is_surfaced_as_concurrent_modification() {
        let orch = orchestrator().await;
        let item = seed_item(orch.service(), ItemType::Content, None).await;
        force_status(orch.service(), &item, ItemStatus::Published).await;

        let response = orch
            .transition_from(
                &actor(ActorRole::Admin, None),
                &item.id,
                ReviewAction::Submit,
                Some(ItemStatus::Draft),
                None,
            )
            .await;
        assert_eq!(
            response.error,
            Some(TransitionFailure::ConcurrentModification {
                current: ItemStatus::Published
            })
        );
    }

    #[tokio::test]
    async fn deny_is_a_hard_stop() {
        let orch = ReviewOrchestrator::new(test_service().await, DenyAll, RecordingNotifier::default());
        let item = seed_item(orch.service(), ItemType::Content, None).await;
        let admin = actor(ActorRole::Admin, None);

        let response = orch.transition(&admin, &item.id, ReviewAction::Submit, None).await;
        assert!(matches!(response.error, Some(TransitionFailure::PermissionDenied { .. })));
        assert_eq!(
            orch.service().db().get_item(&item.id).await.unwrap().status,
            ItemStatus::Draft
        );
        assert!(matches!(
            orch.submit_comment(&admin, &item.id, CommentDraft::new("hi")).await,
            Err(WorkflowError::PermissionDenied { .. })
        ));
        assert_eq!(orch.notifier.levels(), vec![NotifyLevel::Error]);
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let orch = orchestrator().await;
        let response = orch
            .transition(&actor(ActorRole::Admin, None), "itm-missing", ReviewAction::Submit, None)
            .await;
        assert!(matches!(response.error, Some(TransitionFailure::NotFound { .. })));
        assert_eq!(response.new_status, None);
    }

    #[tokio::test]
    async fn reassign_validates_reviewer_and_requires_open_cycle() {
        let orch = orchestrator().await;
        let svc = orch.service();
        let rita = seed_user(svc, "Rita", ActorRole::Reviewer, None).await;
        let sam = seed_user(svc, "Sam", ActorRole::Submitter, None).await;
        let bob = seed_user(svc, "Bob", ActorRole::Reviewer, None).await;
        let admin = actor(ActorRole::Admin, None);
        let item = seed_item(svc, ItemType::Content, None).await;

        assert!(!orch.reassign(&admin, &item.id, &bob.id).await.unwrap());

        let submitted = orch.transition(&admin, &item.id, ReviewAction::Submit, None).await;
        assert!(submitted.applied);
        assert_eq!(
            orch.get_reviewer_assignment(&item.id).await.unwrap().unwrap().assigned_reviewer_id,
            rita.id
        );

        assert!(matches!(
            orch.reassign(&admin, &item.id, &sam.id).await,
            Err(WorkflowError::Validation(_))
        ));
        assert!(orch.reassign(&admin, &item.id, &bob.id).await.unwrap());
        assert_eq!(
            orch.get_reviewer_assignment(&item.id).await.unwrap().unwrap().assigned_reviewer_id,
            bob.id
        );
    }

    #[tokio::test]
    async fn resolve_through_orchestrator_is_idempotent() {
        let orch = orchestrator().await;
        let item = seed_item(orch.service(), ItemType::Content, None).await;
        force_status(orch.service(), &item, ItemStatus::PendingReview).await;
        let rita = actor(ActorRole::Reviewer, None);
        let response = orch
            .transition(&rita, &item.id, ReviewAction::Reject, Some("nope"))
            .await;
        let comment_id = response.comment_id.unwrap();

        assert!(orch.resolve_comment(&rita, &comment_id).await.unwrap());
        assert!(orch.resolve_comment(&rita, &comment_id).await.unwrap());
        assert_eq!(
            orch.notifier.levels(),
            vec![NotifyLevel::Success, NotifyLevel::Success]
        );
    }
}
