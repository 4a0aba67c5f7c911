//! Reviewer directory: the eligible pool, ranked for assignment.

use std::cmp::Ordering;

use revu_core::entities::ReviewerCandidate;

use crate::{ReviewService, WorkflowError};

/// Order of preference between two candidates for an item in `organization_id`.
///
/// Same-organization first (only when the item has one), then lower workload,
/// then least recently assigned with never-assigned first.
fn preference(
    a: &ReviewerCandidate,
    b: &ReviewerCandidate,
    organization_id: Option<&str>,
) -> Ordering {
    let affinity = |c: &ReviewerCandidate| {
        organization_id.map_or(0_u8, |org| u8::from(c.organization_id.as_deref() != Some(org)))
    };
    affinity(a)
        .cmp(&affinity(b))
        .then(a.workload.cmp(&b.workload))
        .then(a.last_assigned_at.cmp(&b.last_assigned_at))
}

/// Sort candidates best-first. Stable: full ties keep their pool order.
pub fn rank_candidates(candidates: &mut [ReviewerCandidate], organization_id: Option<&str>) {
    candidates.sort_by(|a, b| preference(a, b, organization_id));
}

impl ReviewService {
    /// Active internal reviewers ranked for an item in `organization_id`.
    pub async fn find_eligible_reviewers(
        &self,
        organization_id: Option<&str>,
    ) -> Result<Vec<ReviewerCandidate>, WorkflowError> {
        let mut pool = self.db.list_reviewer_pool().await?;
        rank_candidates(&mut pool, organization_id);
        tracing::debug!(
            organization_id,
            candidates = pool.len(),
            "ranked reviewer pool"
        );
        Ok(pool)
    }
}
