//! Review cycle repository.
//!
//! The open cycle is created by a single conditional insert guarded by the
//! `uq_review_cycles_open` partial index, so concurrent submitters converge on
//! one pending cycle instead of racing a read-then-create.

use revu_core::entities::ReviewCycle;
use revu_core::enums::CycleStatus;
use revu_core::ids::PREFIX_CYCLE;

use crate::RevuDb;
use crate::error::{DatabaseError, classify};
use crate::helpers::{
    format_timestamp, get_opt_string, now, parse_datetime, parse_enum, parse_optional_datetime,
};

const SELECT_COLS: &str = "id, item_id, cycle_number, status, submitted_by, submitted_by_name, \
     assigned_reviewer_id, assigned_reviewer_name, created_at, resolved_at";

fn row_to_cycle(row: &libsql::Row) -> Result<ReviewCycle, DatabaseError> {
    Ok(ReviewCycle {
        id: row.get(0)?,
        item_id: row.get(1)?,
        cycle_number: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        submitted_by: row.get(4)?,
        submitted_by_name: row.get(5)?,
        assigned_reviewer_id: get_opt_string(row, 6)?,
        assigned_reviewer_name: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        resolved_at: parse_optional_datetime(get_opt_string(row, 9)?.as_deref())?,
    })
}

impl RevuDb {
    /// Return the item's open cycle, creating it with the next cycle number if
    /// none exists.
    ///
    /// The boolean is `true` when this call created the cycle. A conflict on
    /// `(item_id, cycle_number)` from a concurrent writer is retried up to
    /// `max_attempts` times.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if every attempt lost a race without
    /// an open cycle becoming visible.
    pub async fn upsert_open_cycle(
        &self,
        item_id: &str,
        submitted_by: &str,
        submitted_by_name: &str,
        max_attempts: u32,
    ) -> Result<(ReviewCycle, bool), DatabaseError> {
        for attempt in 1..=max_attempts.max(1) {
            let id = self.generate_id(PREFIX_CYCLE).await?;
            let now = format_timestamp(&now());

            let inserted = self
                .conn()
                .execute(
                    "INSERT INTO review_cycles \
                     (id, item_id, cycle_number, status, submitted_by, submitted_by_name, created_at) \
                     SELECT ?1, ?2, COALESCE(MAX(cycle_number), 0) + 1, 'pending', ?3, ?4, ?5 \
                     FROM review_cycles WHERE item_id = ?2 \
                     ON CONFLICT DO NOTHING",
                    libsql::params![id.as_str(), item_id, submitted_by, submitted_by_name, now],
                )
                .await
                .map_err(|e| classify(e, "review_cycles insert"))?;

            if let Some(cycle) = self.get_open_cycle(item_id).await? {
                return Ok((cycle, inserted == 1));
            }
            tracing::debug!(item_id, attempt, "open cycle upsert lost a race, retrying");
        }

        Err(DatabaseError::Conflict(format!(
            "could not open a review cycle for {item_id}"
        )))
    }

    pub async fn get_cycle(&self, id: &str) -> Result<ReviewCycle, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM review_cycles WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_cycle(&row)
    }

    pub async fn get_open_cycle(&self, item_id: &str) -> Result<Option<ReviewCycle>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM review_cycles WHERE item_id = ?1 AND status = 'pending'"
                ),
                [item_id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_cycle(&row)).transpose()
    }

    pub async fn get_latest_cycle(
        &self,
        item_id: &str,
    ) -> Result<Option<ReviewCycle>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM review_cycles WHERE item_id = ?1 \
                     ORDER BY cycle_number DESC LIMIT 1"
                ),
                [item_id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_cycle(&row)).transpose()
    }

    pub async fn list_cycles(&self, item_id: &str) -> Result<Vec<ReviewCycle>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM review_cycles WHERE item_id = ?1 ORDER BY cycle_number"
                ),
                [item_id],
            )
            .await?;

        let mut cycles = Vec::new();
        while let Some(row) = rows.next().await? {
            cycles.push(row_to_cycle(&row)?);
        }
        Ok(cycles)
    }

    /// Record the cycle's current reviewer.
    pub async fn set_cycle_reviewer(
        &self,
        cycle_id: &str,
        reviewer_id: &str,
        reviewer_name: &str,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "UPDATE review_cycles SET assigned_reviewer_id = ?1, assigned_reviewer_name = ?2 \
                 WHERE id = ?3",
                libsql::params![reviewer_id, reviewer_name, cycle_id],
            )
            .await?;
        Ok(())
    }

    /// Close a pending cycle. Returns `false` if it was not pending.
    pub async fn close_cycle(
        &self,
        cycle_id: &str,
        outcome: CycleStatus,
    ) -> Result<bool, DatabaseError> {
        if !CycleStatus::Pending.can_transition_to(outcome) {
            return Err(DatabaseError::InvalidState(format!(
                "cannot close cycle {cycle_id} as {outcome}"
            )));
        }
        let changed = self
            .conn()
            .execute(
                "UPDATE review_cycles SET status = ?1, resolved_at = ?2 \
                 WHERE id = ?3 AND status = 'pending'",
                libsql::params![outcome.as_str(), format_timestamp(&now()), cycle_id],
            )
            .await?;
        Ok(changed == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_item, test_db};
    use revu_core::enums::ItemType;

    #[tokio::test]
    async fn first_upsert_creates_cycle_one() {
        let db = test_db().await;
        let item = seed_item(&db, ItemType::Content, None).await;

        let (cycle, created) = db
            .upsert_open_cycle(&item.id, "usr-1", "Sam", 3)
            .await
            .unwrap();
        assert!(created);
        assert_eq!(cycle.cycle_number, 1);
        assert_eq!(cycle.status, CycleStatus::Pending);
        assert_eq!(cycle.submitted_by_name, "Sam");
    }

    #[tokio::test]
    async fn repeated_upsert_reuses_open_cycle() {
        let db = test_db().await;
        let item = seed_item(&db, ItemType::Content, None).await;

        let (first, _) = db.upsert_open_cycle(&item.id, "usr-1", "Sam", 3).await.unwrap();
        let (second, created) = db.upsert_open_cycle(&item.id, "usr-2", "Other", 3).await.unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(db.list_cycles(&item.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn closed_cycle_is_superseded_by_next_number() {
        let db = test_db().await;
        let item = seed_item(&db, ItemType::Content, None).await;

        let (first, _) = db.upsert_open_cycle(&item.id, "usr-1", "Sam", 3).await.unwrap();
        assert!(db.close_cycle(&first.id, CycleStatus::Rejected).await.unwrap());
        assert!(db.get_open_cycle(&item.id).await.unwrap().is_none());

        let (second, created) = db.upsert_open_cycle(&item.id, "usr-1", "Sam", 3).await.unwrap();
        assert!(created);
        assert_eq!(second.cycle_number, 2);

        let cycles = db.list_cycles(&item.id).await.unwrap();
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].status, CycleStatus::Rejected);
        assert!(cycles[0].resolved_at.is_some());
        assert_eq!(db.get_latest_cycle(&item.id).await.unwrap().unwrap().id, second.id);
    }

    #[tokio::test]
    async fn concurrent_upserts_converge_on_one_cycle() {
        let db = test_db().await;
        let item = seed_item(&db, ItemType::Service, None).await;

        let (a, b) = tokio::join!(
            db.upsert_open_cycle(&item.id, "usr-1", "Sam", 3),
            db.upsert_open_cycle(&item.id, "usr-2", "Sue", 3),
        );
        let (a, a_created) = a.unwrap();
        let (b, b_created) = b.unwrap();
        assert_eq!(a.id, b.id);
        assert!(a_created ^ b_created);
    }

    #[tokio::test]
    async fn second_open_cycle_rejected_by_storage() {
        let db = test_db().await;
        let item = seed_item(&db, ItemType::Content, None).await;
        db.upsert_open_cycle(&item.id, "usr-1", "Sam", 3).await.unwrap();

        let result = db
            .conn()
            .execute(
                "INSERT INTO review_cycles (id, item_id, cycle_number, status, submitted_by, submitted_by_name, created_at) \
                 VALUES ('cyc-dup', ?1, 99, 'pending', 'usr-1', 'Sam', '2026-01-01T00:00:00.000000Z')",
                [item.id.as_str()],
            )
            .await;
        assert!(result.is_err(), "a second pending cycle must violate the partial index");
    }

    #[tokio::test]
    async fn close_cycle_only_once() {
        let db = test_db().await;
        let item = seed_item(&db, ItemType::Content, None).await;
        let (cycle, _) = db.upsert_open_cycle(&item.id, "usr-1", "Sam", 3).await.unwrap();

        assert!(db.close_cycle(&cycle.id, CycleStatus::Approved).await.unwrap());
        assert!(!db.close_cycle(&cycle.id, CycleStatus::Rejected).await.unwrap());
        assert!(matches!(
            db.close_cycle(&cycle.id, CycleStatus::Pending).await,
            Err(DatabaseError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn set_cycle_reviewer() {
        let db = test_db().await;
        let item = seed_item(&db, ItemType::Content, None).await;
        let (cycle, _) = db.upsert_open_cycle(&item.id, "usr-1", "Sam", 3).await.unwrap();

        db.set_cycle_reviewer(&cycle.id, "usr-9", "Rita").await.unwrap();
        let fetched = db.get_cycle(&cycle.id).await.unwrap();
        assert_eq!(fetched.assigned_reviewer_id.as_deref(), Some("usr-9"));
        assert_eq!(fetched.assigned_reviewer_name.as_deref(), Some("Rita"));
    }
}
