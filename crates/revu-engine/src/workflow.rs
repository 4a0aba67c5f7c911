//! Workflow state machine.
//!
//! A transition is validated against the item's persisted status and applied
//! with a compare-and-swap write. Losing that race, or arriving with a stale
//! expected status, yields [`TransitionResult::NotApplied`] rather than an
//! error; the caller re-reads and decides. Nothing is retried here.
//!
//! Effects after the status write (cycle, assignment, audit) run fail-fast
//! with no compensation: an error there is propagated with the new status
//! already in place.

use serde::{Deserialize, Serialize};

use revu_core::entities::{ReviewAssignment, ReviewCycle, ReviewableItem};
use revu_core::enums::{AssignmentStatus, ItemStatus, ReviewAction};
use revu_core::identity::ActorContext;
use revu_core::metadata::{ReviewerRef, TransitionMetadata};
use revu_db::error::DatabaseError;

use crate::audit_log::AuditRecord;
use crate::error::or_not_found;
use crate::{ReviewService, WorkflowError};

/// A requested transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionRequest {
    pub item_id: String,
    pub action: ReviewAction,
    /// Status the caller last observed. The write only lands if the item is
    /// still in this status.
    pub expected_previous: ItemStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
    /// Justification comment; required for `Reject` and `SendBack`.
    pub comment_id: Option<String>,
    /// Extra audit metadata, stored verbatim under `extra`.
    pub metadata: Option<serde_json::Value>,
}

impl TransitionRequest {
    #[must_use]
    pub fn new(item_id: impl Into<String>, action: ReviewAction, expected_previous: ItemStatus) -> Self {
        Self {
            item_id: item_id.into(),
            action,
            expected_previous,
            reason: None,
            notes: None,
            comment_id: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment_id: impl Into<String>) -> Self {
        self.comment_id = Some(comment_id.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Why a transition did not land.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotAppliedReason {
    /// The persisted status already differed from the expected one.
    StaleRead,
    /// Another writer changed the status between read and write.
    LostRace,
}

/// Everything a landed transition changed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AppliedTransition {
    pub item_id: String,
    pub action: ReviewAction,
    pub previous: ItemStatus,
    pub status: ItemStatus,
    /// The cycle opened, closed, or (for other actions) the latest one.
    pub cycle: Option<ReviewCycle>,
    /// Assignment created or completed by this transition.
    pub assignment: Option<ReviewAssignment>,
    pub audit_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionResult {
    Applied(AppliedTransition),
    NotApplied {
        reason: NotAppliedReason,
        current: ItemStatus,
    },
}

impl TransitionResult {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Item status after the call, as far as this caller knows.
    #[must_use]
    pub const fn status(&self) -> ItemStatus {
        match self {
            Self::Applied(applied) => applied.status,
            Self::NotApplied { current, .. } => *current,
        }
    }
}

impl ReviewService {
    /// Validate and apply `request` on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item does not exist
    /// - `InvalidTransition` if the action is illegal from the current status
    /// - `PermissionDenied` if an external actor acts outside their organization
    /// - `UnresolvedRejections` if a resubmission is blocked
    /// - `MissingJustification` if a reject/send-back lacks an open comment
    ///   of the required type written during the current review
    /// - `NotFound` / `Validation` if another action references a comment
    ///   that is missing or belongs to another item
    /// - `Persistence` on storage failure
    #[tracing::instrument(
        skip(self, actor, request),
        fields(item_id = %request.item_id, action = %request.action, actor = %actor.user_id)
    )]
    pub async fn transition(
        &self,
        actor: &ActorContext,
        request: TransitionRequest,
    ) -> Result<TransitionResult, WorkflowError> {
        let item = self
            .db
            .get_item(&request.item_id)
            .await
            .map_err(or_not_found("item", &request.item_id))?;

        if item.status != request.expected_previous {
            tracing::warn!(
                expected = %request.expected_previous,
                current = %item.status,
                "transition not applied: stale read"
            );
            return Ok(TransitionResult::NotApplied {
                reason: NotAppliedReason::StaleRead,
                current: item.status,
            });
        }

        let action = request.action;
        let target = action
            .apply(item.status)
            .ok_or(WorkflowError::InvalidTransition {
                action,
                from: item.status,
            })?;

        check_organization(actor, &item, action)?;
        if action == ReviewAction::Resubmit {
            self.check_resubmit_gate(&item.id).await?;
        }
        let comment_id = self.check_justification(&item, &request).await?;

        let written = self
            .db
            .update_item_status_if(&item.id, item.item_type, item.status, target)
            .await?;
        if !written {
            let current = self.db.get_item(&item.id).await?.status;
            tracing::warn!(%current, "transition not applied: lost race");
            return Ok(TransitionResult::NotApplied {
                reason: NotAppliedReason::LostRace,
                current,
            });
        }
        tracing::info!(from = %item.status, to = %target, "status written");

        let applied = self
            .apply_effects(actor, &item, &request, target, comment_id)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, status = %target, "status written but follow-up effects failed");
            })?;
        Ok(TransitionResult::Applied(applied))
    }

    async fn check_resubmit_gate(&self, item_id: &str) -> Result<(), WorkflowError> {
        let blocking = self.db.list_unresolved_rejections(item_id).await?;
        if blocking.is_empty() {
            return Ok(());
        }
        tracing::warn!(count = blocking.len(), "resubmission blocked by open rejections");
        Err(WorkflowError::UnresolvedRejections {
            count: blocking.len(),
            comment_ids: blocking.into_iter().map(|c| c.id).collect(),
        })
    }

    /// The justification comment id, when the action needs one.
    ///
    /// A justification must be an open comment of the required type written
    /// during the current review: on or after the open cycle was created,
    /// or after the item last changed status when no cycle is open.
    /// Actions without a requirement may still reference a comment on the
    /// same item; it is recorded in the audit metadata.
    async fn check_justification(
        &self,
        item: &ReviewableItem,
        request: &TransitionRequest,
    ) -> Result<Option<String>, WorkflowError> {
        let Some(required) = request.action.required_comment() else {
            return self.check_referenced_comment(item, request).await;
        };
        let missing = WorkflowError::MissingJustification {
            action: request.action,
            required,
        };
        let Some(comment_id) = request.comment_id.as_deref() else {
            return Err(missing);
        };
        let comment = match self.db.get_comment(comment_id).await {
            Ok(comment) => comment,
            Err(DatabaseError::NoResult) => return Err(missing),
            Err(e) => return Err(e.into()),
        };
        if comment.item_id != item.id || comment.comment_type != required || comment.is_resolved {
            return Err(missing);
        }

        let review_started = match self.db.get_open_cycle(&item.id).await? {
            Some(cycle) => cycle.created_at,
            None => item.updated_at,
        };
        if comment.created_at < review_started {
            tracing::warn!(comment_id, "justification predates the current review");
            return Err(missing);
        }
        Ok(Some(comment.id))
    }

    async fn check_referenced_comment(
        &self,
        item: &ReviewableItem,
        request: &TransitionRequest,
    ) -> Result<Option<String>, WorkflowError> {
        let Some(comment_id) = request.comment_id.as_deref() else {
            return Ok(None);
        };
        let comment = self
            .db
            .get_comment(comment_id)
            .await
            .map_err(or_not_found("comment", comment_id))?;
        if comment.item_id != item.id {
            return Err(WorkflowError::Validation(format!(
                "comment {comment_id} belongs to another item"
            )));
        }
        Ok(Some(comment.id))
    }

    async fn apply_effects(
        &self,
        actor: &ActorContext,
        item: &ReviewableItem,
        request: &TransitionRequest,
        target: ItemStatus,
        comment_id: Option<String>,
    ) -> Result<AppliedTransition, WorkflowError> {
        let action = request.action;
        let (cycle, assignment) = self.cycle_effects(actor, item, action).await?;

        let assigned_reviewer = assignment
            .as_ref()
            .filter(|_| action.enters_review())
            .map(|a| ReviewerRef {
                id: a.assigned_reviewer_id.clone(),
                name: a.assigned_reviewer_name.clone(),
            });
        let metadata = TransitionMetadata {
            cycle_number: cycle.as_ref().map(|c| c.cycle_number),
            assigned_reviewer,
            comment_id,
            extra: request.metadata.clone(),
        };

        let entry = self
            .append_audit(AuditRecord {
                review_cycle_id: cycle.as_ref().map(|c| c.id.as_str()),
                item_id: &item.id,
                action: action.into(),
                actor,
                previous_status: Some(item.status),
                new_status: Some(target),
                reason: request.reason.as_deref(),
                notes: request.notes.as_deref(),
                metadata: Some(serde_json::to_value(&metadata)?),
            })
            .await?;

        Ok(AppliedTransition {
            item_id: item.id.clone(),
            action,
            previous: item.status,
            status: target,
            cycle,
            assignment,
            audit_id: entry.id,
        })
    }

    async fn cycle_effects(
        &self,
        actor: &ActorContext,
        item: &ReviewableItem,
        action: ReviewAction,
    ) -> Result<(Option<ReviewCycle>, Option<ReviewAssignment>), WorkflowError> {
        if action.enters_review() {
            let (cycle, created) = self
                .db
                .upsert_open_cycle(
                    &item.id,
                    &actor.user_id,
                    &actor.name,
                    self.config.max_cycle_upsert_attempts,
                )
                .await?;
            tracing::debug!(cycle_id = %cycle.id, cycle_number = cycle.cycle_number, created, "open cycle");

            let assignment = match self.db.get_active_assignment(&cycle.id).await? {
                Some(existing) => Some(existing),
                None => {
                    self.auto_assign(&cycle, item.organization_id.as_deref(), actor)
                        .await?
                }
            };
            let cycle = self.db.get_cycle(&cycle.id).await?;
            return Ok((Some(cycle), assignment));
        }

        if let Some(outcome) = action.cycle_outcome() {
            let Some(cycle) = self.db.get_open_cycle(&item.id).await? else {
                tracing::warn!("no open cycle to close");
                return Ok((None, None));
            };
            let active = self.db.get_active_assignment(&cycle.id).await?;
            self.db.close_cycle(&cycle.id, outcome).await?;
            self.db.complete_active_assignment(&cycle.id).await?;
            let cycle = self.db.get_cycle(&cycle.id).await?;
            let completed = active.map(|a| ReviewAssignment {
                status: AssignmentStatus::Completed,
                ..a
            });
            return Ok((Some(cycle), completed));
        }

        Ok((self.db.get_latest_cycle(&item.id).await?, None))
    }
}

/// External actors may only act on their own organization's items.
pub(crate) fn check_organization(
    actor: &ActorContext,
    item: &ReviewableItem,
    action: ReviewAction,
) -> Result<(), WorkflowError> {
    if actor.is_internal()
        || !action.requires_org_match()
        || actor.belongs_to(item.organization_id.as_deref())
    {
        return Ok(());
    }
    tracing::warn!(
        actor_org = actor.organization_id.as_deref(),
        item_org = item.organization_id.as_deref(),
        "organization mismatch"
    );
    Err(WorkflowError::PermissionDenied {
        reason: format!("{action} on an item outside your organization"),
    })
}
