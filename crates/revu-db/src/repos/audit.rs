//! Audit log repository.
//!
//! Append and read only. The `audit_log_no_update` / `audit_log_no_delete`
//! triggers reject any other write.

use revu_core::entities::AuditEntry;

use crate::RevuDb;
use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, parse_datetime, parse_enum, parse_optional_enum,
    parse_optional_json,
};

const SELECT_COLS: &str = "id, review_cycle_id, item_id, action, action_by, action_by_name, \
     previous_status, new_status, reason, notes, metadata, created_at";

fn row_to_audit(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get(0)?,
        review_cycle_id: get_opt_string(row, 1)?,
        item_id: row.get(2)?,
        action: parse_enum(&row.get::<String>(3)?)?,
        action_by: row.get(4)?,
        action_by_name: row.get(5)?,
        previous_status: parse_optional_enum(get_opt_string(row, 6)?.as_deref())?,
        new_status: parse_optional_enum(get_opt_string(row, 7)?.as_deref())?,
        reason: get_opt_string(row, 8)?,
        notes: get_opt_string(row, 9)?,
        metadata: parse_optional_json(get_opt_string(row, 10)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

impl RevuDb {
    /// Append an entry. Statuses are stored canonically.
    pub async fn append_audit(&self, entry: &AuditEntry) -> Result<(), DatabaseError> {
        let metadata = entry
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DatabaseError::Other(e.into()))?;

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO audit_log ({SELECT_COLS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
                ),
                libsql::params![
                    entry.id.as_str(),
                    entry.review_cycle_id.as_deref(),
                    entry.item_id.as_str(),
                    entry.action.as_str(),
                    entry.action_by.as_str(),
                    entry.action_by_name.as_str(),
                    entry.previous_status.map(|s| s.as_str()),
                    entry.new_status.map(|s| s.as_str()),
                    entry.reason.as_deref(),
                    entry.notes.as_deref(),
                    metadata,
                    format_timestamp(&entry.created_at)
                ],
            )
            .await?;
        Ok(())
    }

    /// One page of an item's audit entries, newest first.
    pub async fn list_audit(
        &self,
        item_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM audit_log WHERE item_id = ?1 \
                     ORDER BY created_at DESC, rowid DESC LIMIT ?2 OFFSET ?3"
                ),
                libsql::params![item_id, i64::from(limit), i64::from(offset)],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_audit(&row)?);
        }
        Ok(entries)
    }

    pub async fn count_audit(&self, item_id: &str) -> Result<u64, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*) FROM audit_log WHERE item_id = ?1", [item_id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        u64::try_from(row.get::<i64>(0)?)
            .map_err(|e| DatabaseError::InvalidState(format!("negative audit count: {e}")))
    }
}
