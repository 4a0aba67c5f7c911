//! Assignment engine.
//!
//! Picks the best-ranked reviewer when a cycle opens, and moves a cycle to a
//! different reviewer on request. Each cycle has at most one active
//! assignment; superseded rows stay behind as `reassigned`.

use chrono::{Duration, Utc};

use revu_core::entities::{ReviewAssignment, ReviewCycle};
use revu_core::enums::{AssignmentStatus, AuditAction};
use revu_core::identity::ActorContext;
use revu_core::metadata::{ReassignMetadata, ReviewerRef};
use revu_db::error::DatabaseError;
use revu_db::helpers;
use revu_db::repos::assignments::NewAssignment;

use crate::audit_log::AuditRecord;
use crate::error::or_not_found;
use crate::{ReviewService, WorkflowError};

impl ReviewService {
    fn due_from(&self, assigned_at: chrono::DateTime<Utc>) -> chrono::DateTime<Utc> {
        assigned_at + Duration::days(i64::from(self.config.assignment_due_days))
    }

    /// Assign the rank-0 reviewer to `cycle`.
    ///
    /// Returns `None` when the pool is empty; the cycle then stays unassigned.
    #[tracing::instrument(skip(self, cycle), fields(cycle_id = %cycle.id))]
    pub async fn auto_assign(
        &self,
        cycle: &ReviewCycle,
        organization_id: Option<&str>,
        actor: &ActorContext,
    ) -> Result<Option<ReviewAssignment>, WorkflowError> {
        let pool = self.find_eligible_reviewers(organization_id).await?;
        let Some(pick) = pool.first() else {
            tracing::warn!(item_id = %cycle.item_id, "reviewer pool is empty; cycle left unassigned");
            return Ok(None);
        };

        let now = helpers::now();
        let inserted = self
            .db
            .insert_assignment(NewAssignment {
                review_cycle_id: &cycle.id,
                item_id: &cycle.item_id,
                reviewer_id: &pick.user_id,
                reviewer_name: &pick.name,
                assigned_by: &actor.user_id,
                assigned_at: now,
                due_date: self.due_from(now),
            })
            .await;

        match inserted {
            Ok(assignment) => {
                tracing::info!(reviewer = %assignment.assigned_reviewer_id, "reviewer assigned");
                Ok(Some(assignment))
            }
            // Another writer assigned this cycle first; theirs stands.
            Err(DatabaseError::Conflict(_)) => Ok(self.db.get_active_assignment(&cycle.id).await?),
            Err(e) => Err(e.into()),
        }
    }

    /// Move the cycle's active assignment to a new reviewer and audit it.
    ///
    /// Returns `false` without writing anything if the cycle does not exist,
    /// is no longer open, or a concurrent reassignment won.
    #[tracing::instrument(skip(self))]
    pub async fn reassign(
        &self,
        cycle_id: &str,
        new_reviewer_id: &str,
        new_reviewer_name: &str,
        actor: &ActorContext,
    ) -> Result<bool, WorkflowError> {
        let cycle = match self.db.get_cycle(cycle_id).await {
            Ok(cycle) => cycle,
            Err(DatabaseError::NoResult) => {
                tracing::warn!("reassign requested for unknown cycle");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };
        if !cycle.status.is_open() {
            tracing::warn!(status = %cycle.status, "reassign requested for closed cycle");
            return Ok(false);
        }

        let now = helpers::now();
        let replaced = self
            .db
            .replace_active_assignment(NewAssignment {
                review_cycle_id: &cycle.id,
                item_id: &cycle.item_id,
                reviewer_id: new_reviewer_id,
                reviewer_name: new_reviewer_name,
                assigned_by: &actor.user_id,
                assigned_at: now,
                due_date: self.due_from(now),
            })
            .await;
        let (previous, current) = match replaced {
            Ok(pair) => pair,
            Err(DatabaseError::Conflict(reason)) => {
                tracing::warn!(%reason, "reassignment lost a race");
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        let metadata = ReassignMetadata {
            previous_reviewer: previous.map(|p| ReviewerRef {
                id: p.assigned_reviewer_id,
                name: p.assigned_reviewer_name,
            }),
            new_reviewer: ReviewerRef {
                id: current.assigned_reviewer_id.clone(),
                name: current.assigned_reviewer_name.clone(),
            },
        };
        self.append_audit(AuditRecord {
            review_cycle_id: Some(&cycle.id),
            item_id: &cycle.item_id,
            action: AuditAction::Reassign,
            actor,
            previous_status: None,
            new_status: None,
            reason: None,
            notes: None,
            metadata: Some(serde_json::to_value(&metadata)?),
        })
        .await?;
        tracing::info!(reviewer = %current.assigned_reviewer_id, "cycle reassigned");
        Ok(true)
    }

    /// The active assignment of the item's open cycle, if any.
    pub async fn current_assignment(
        &self,
        item_id: &str,
    ) -> Result<Option<ReviewAssignment>, WorkflowError> {
        match self.db.get_open_cycle(item_id).await? {
            Some(cycle) => Ok(self.db.get_active_assignment(&cycle.id).await?),
            None => Ok(None),
        }
    }

    /// The assigned reviewer acknowledges the assignment.
    pub async fn accept_assignment(
        &self,
        actor: &ActorContext,
        assignment_id: &str,
    ) -> Result<ReviewAssignment, WorkflowError> {
        self.advance_assignment(actor, assignment_id, AssignmentStatus::Accepted)
            .await
    }

    /// The assigned reviewer starts work.
    pub async fn start_assignment(
        &self,
        actor: &ActorContext,
        assignment_id: &str,
    ) -> Result<ReviewAssignment, WorkflowError> {
        self.advance_assignment(actor, assignment_id, AssignmentStatus::InProgress)
            .await
    }

    async fn advance_assignment(
        &self,
        actor: &ActorContext,
        assignment_id: &str,
        next: AssignmentStatus,
    ) -> Result<ReviewAssignment, WorkflowError> {
        let assignment = self
            .db
            .get_assignment(assignment_id)
            .await
            .map_err(or_not_found("assignment", assignment_id))?;
        if assignment.assigned_reviewer_id != actor.user_id {
            return Err(WorkflowError::PermissionDenied {
                reason: format!("assignment {assignment_id} belongs to another reviewer"),
            });
        }
        if !assignment.status.can_transition_to(next) {
            return Err(WorkflowError::Validation(format!(
                "assignment is {} and cannot become {next}",
                assignment.status
            )));
        }
        let moved = self
            .db
            .update_assignment_status_if(assignment_id, assignment.status, next)
            .await?;
        if !moved {
            return Err(WorkflowError::Validation(format!(
                "assignment {assignment_id} changed concurrently"
            )));
        }
        Ok(ReviewAssignment {
            status: next,
            ..assignment
        })
    }
}
