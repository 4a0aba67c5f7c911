//! Review assignment repository.
//!
//! Rows are immutable once superseded. The `uq_review_assignments_active`
//! partial index keeps at most one non-terminal assignment per cycle.

use chrono::{DateTime, Utc};

use revu_core::entities::ReviewAssignment;
use revu_core::enums::{AssignmentStatus, AssignmentType};
use revu_core::ids::PREFIX_ASSIGNMENT;

use crate::RevuDb;
use crate::error::{DatabaseError, classify};
use crate::helpers::{format_timestamp, parse_datetime, parse_enum, to_stored_precision};

const SELECT_COLS: &str = "id, review_cycle_id, item_id, assigned_reviewer_id, \
     assigned_reviewer_name, assignment_type, assigned_by, status, assigned_at, due_date";

const ACTIVE_FILTER: &str = "status IN ('assigned', 'accepted', 'in_progress')";

fn row_to_assignment(row: &libsql::Row) -> Result<ReviewAssignment, DatabaseError> {
    Ok(ReviewAssignment {
        id: row.get(0)?,
        review_cycle_id: row.get(1)?,
        item_id: row.get(2)?,
        assigned_reviewer_id: row.get(3)?,
        assigned_reviewer_name: row.get(4)?,
        assignment_type: parse_enum(&row.get::<String>(5)?)?,
        assigned_by: row.get(6)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        assigned_at: parse_datetime(&row.get::<String>(8)?)?,
        due_date: parse_datetime(&row.get::<String>(9)?)?,
    })
}

/// Parameters for a new primary assignment.
#[derive(Debug, Clone)]
pub struct NewAssignment<'a> {
    pub review_cycle_id: &'a str,
    pub item_id: &'a str,
    pub reviewer_id: &'a str,
    pub reviewer_name: &'a str,
    pub assigned_by: &'a str,
    pub assigned_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl NewAssignment<'_> {
    fn into_row(self, id: String) -> ReviewAssignment {
        ReviewAssignment {
            id,
            review_cycle_id: self.review_cycle_id.to_string(),
            item_id: self.item_id.to_string(),
            assigned_reviewer_id: self.reviewer_id.to_string(),
            assigned_reviewer_name: self.reviewer_name.to_string(),
            assignment_type: AssignmentType::Primary,
            assigned_by: self.assigned_by.to_string(),
            status: AssignmentStatus::Assigned,
            assigned_at: to_stored_precision(self.assigned_at),
            due_date: to_stored_precision(self.due_date),
        }
    }
}

async fn insert_row(
    conn: &libsql::Connection,
    row: &ReviewAssignment,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!(
            "INSERT INTO review_assignments ({SELECT_COLS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
        ),
        libsql::params![
            row.id.as_str(),
            row.review_cycle_id.as_str(),
            row.item_id.as_str(),
            row.assigned_reviewer_id.as_str(),
            row.assigned_reviewer_name.as_str(),
            row.assignment_type.as_str(),
            row.assigned_by.as_str(),
            row.status.as_str(),
            format_timestamp(&row.assigned_at),
            format_timestamp(&row.due_date)
        ],
    )
    .await
    .map_err(|e| classify(e, "review_assignments insert"))?;
    Ok(())
}

impl RevuDb {
    /// Insert a primary assignment and point the cycle at the reviewer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if the cycle already has an active
    /// assignment.
    pub async fn insert_assignment(
        &self,
        new: NewAssignment<'_>,
    ) -> Result<ReviewAssignment, DatabaseError> {
        let id = self.generate_id(PREFIX_ASSIGNMENT).await?;
        let row = new.into_row(id);
        insert_row(self.conn(), &row).await?;
        self.set_cycle_reviewer(
            &row.review_cycle_id,
            &row.assigned_reviewer_id,
            &row.assigned_reviewer_name,
        )
        .await?;
        Ok(row)
    }

    /// Supersede the cycle's active assignment (if any) with a new one.
    ///
    /// Runs in one transaction: mark the old row `reassigned`, insert the new
    /// row, update the cycle's reviewer. Nothing is written if any step fails.
    pub async fn replace_active_assignment(
        &self,
        new: NewAssignment<'_>,
    ) -> Result<(Option<ReviewAssignment>, ReviewAssignment), DatabaseError> {
        let id = self.generate_id(PREFIX_ASSIGNMENT).await?;
        let previous = self.get_active_assignment(new.review_cycle_id).await?;
        let row = new.into_row(id);

        let tx = self.conn().transaction().await?;
        if let Some(prev) = &previous {
            let changed = tx
                .execute(
                    &format!(
                        "UPDATE review_assignments SET status = 'reassigned' \
                         WHERE id = ?1 AND {ACTIVE_FILTER}"
                    ),
                    [prev.id.as_str()],
                )
                .await?;
            if changed != 1 {
                tx.rollback().await?;
                return Err(DatabaseError::Conflict(format!(
                    "assignment {} changed during reassignment",
                    prev.id
                )));
            }
        }
        if let Err(e) = insert_row(&tx, &row).await {
            tx.rollback().await?;
            return Err(e);
        }
        tx.execute(
            "UPDATE review_cycles SET assigned_reviewer_id = ?1, assigned_reviewer_name = ?2 \
             WHERE id = ?3",
            libsql::params![
                row.assigned_reviewer_id.as_str(),
                row.assigned_reviewer_name.as_str(),
                row.review_cycle_id.as_str()
            ],
        )
        .await?;
        tx.commit().await?;

        let previous = previous.map(|prev| ReviewAssignment {
            status: AssignmentStatus::Reassigned,
            ..prev
        });
        Ok((previous, row))
    }

    pub async fn get_assignment(&self, id: &str) -> Result<ReviewAssignment, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM review_assignments WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_assignment(&row)
    }

    /// The cycle's non-terminal assignment, if any.
    pub async fn get_active_assignment(
        &self,
        cycle_id: &str,
    ) -> Result<Option<ReviewAssignment>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM review_assignments \
                     WHERE review_cycle_id = ?1 AND {ACTIVE_FILTER}"
                ),
                [cycle_id],
            )
            .await?;
        rows.next()
            .await?
            .map(|row| row_to_assignment(&row))
            .transpose()
    }

    /// All assignments of a cycle, oldest first.
    pub async fn list_assignments(
        &self,
        cycle_id: &str,
    ) -> Result<Vec<ReviewAssignment>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM review_assignments \
                     WHERE review_cycle_id = ?1 ORDER BY assigned_at, rowid"
                ),
                [cycle_id],
            )
            .await?;

        let mut assignments = Vec::new();
        while let Some(row) = rows.next().await? {
            assignments.push(row_to_assignment(&row)?);
        }
        Ok(assignments)
    }

    /// Conditionally move an assignment from `expected` to `new`.
    pub async fn update_assignment_status_if(
        &self,
        assignment_id: &str,
        expected: AssignmentStatus,
        new: AssignmentStatus,
    ) -> Result<bool, DatabaseError> {
        if !expected.can_transition_to(new) {
            return Err(DatabaseError::InvalidState(format!(
                "cannot move assignment {assignment_id} from {expected} to {new}"
            )));
        }
        let changed = self
            .conn()
            .execute(
                "UPDATE review_assignments SET status = ?1 WHERE id = ?2 AND status = ?3",
                libsql::params![new.as_str(), assignment_id, expected.as_str()],
            )
            .await?;
        Ok(changed == 1)
    }

    /// Move the cycle's active assignment to `completed`. Returns `false` if
    /// the cycle had none.
    pub async fn complete_active_assignment(&self, cycle_id: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                &format!(
                    "UPDATE review_assignments SET status = 'completed' \
                     WHERE review_cycle_id = ?1 AND {ACTIVE_FILTER}"
                ),
                [cycle_id],
            )
            .await?;
        Ok(changed > 0)
    }
}
