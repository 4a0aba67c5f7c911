//! Reviewer pool query.
//!
//! Workload is computed live from `review_assignments`; there is no cached
//! counter to drift.

use revu_core::entities::ReviewerCandidate;

use crate::RevuDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_enum, parse_optional_datetime};

impl RevuDb {
    /// Active internal reviewers with their current workload, in registration
    /// order. Ranking is left to the caller.
    pub async fn list_reviewer_pool(&self) -> Result<Vec<ReviewerCandidate>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT u.id, u.name, u.role, u.organization_id, \
                        COUNT(a.id), MAX(a.assigned_at) \
                 FROM users u \
                 LEFT JOIN review_assignments a \
                   ON a.assigned_reviewer_id = u.id \
                  AND a.status IN ('assigned', 'accepted', 'in_progress') \
                 WHERE u.is_active = 1 AND u.role IN ('admin', 'reviewer') \
                 GROUP BY u.id \
                 ORDER BY u.rowid",
                (),
            )
            .await?;

        let mut pool = Vec::new();
        while let Some(row) = rows.next().await? {
            let workload = u32::try_from(row.get::<i64>(4)?)
                .map_err(|e| DatabaseError::InvalidState(format!("workload out of range: {e}")))?;
            pool.push(ReviewerCandidate {
                user_id: row.get(0)?,
                name: row.get(1)?,
                role: parse_enum(&row.get::<String>(2)?)?,
                organization_id: get_opt_string(&row, 3)?,
                workload,
                last_assigned_at: parse_optional_datetime(get_opt_string(&row, 5)?.as_deref())?,
            });
        }
        Ok(pool)
    }
}
