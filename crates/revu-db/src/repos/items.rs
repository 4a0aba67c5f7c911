//! Reviewable item repository: creation, reads, and the compare-and-swap
//! status write.
//!
//! `items.status` stores the item type's native vocabulary. Every read and
//! write goes through [`revu_core::vocab`] so callers only see canonical
//! [`ItemStatus`] values.

use revu_core::entities::ReviewableItem;
use revu_core::enums::{ItemStatus, ItemType};
use revu_core::ids::PREFIX_ITEM;
use revu_core::vocab;

use crate::RevuDb;
use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now, parse_datetime, parse_enum};

const SELECT_COLS: &str =
    "id, item_type, organization_id, title, status, created_by, created_at, updated_at";

fn row_to_item(row: &libsql::Row) -> Result<ReviewableItem, DatabaseError> {
    let item_type: ItemType = parse_enum(&row.get::<String>(1)?)?;
    let native: String = row.get(4)?;
    let status = vocab::to_canonical(item_type, &native)
        .map_err(|e| DatabaseError::InvalidState(e.to_string()))?;
    Ok(ReviewableItem {
        id: row.get(0)?,
        item_type,
        organization_id: get_opt_string(row, 2)?,
        title: row.get(3)?,
        status,
        created_by: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl RevuDb {
    /// Insert a new item in `Draft`.
    pub async fn create_item(
        &self,
        item_type: ItemType,
        organization_id: Option<&str>,
        title: &str,
        created_by: &str,
    ) -> Result<ReviewableItem, DatabaseError> {
        let now = now();
        let id = self.generate_id(PREFIX_ITEM).await?;
        let ts = format_timestamp(&now);

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO items ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    item_type.as_str(),
                    organization_id,
                    title,
                    vocab::to_native(item_type, ItemStatus::Draft),
                    created_by,
                    ts.as_str(),
                    ts.as_str()
                ],
            )
            .await?;

        Ok(ReviewableItem {
            id,
            item_type,
            organization_id: organization_id.map(String::from),
            title: title.to_string(),
            status: ItemStatus::Draft,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_item(&self, id: &str) -> Result<ReviewableItem, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM items WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_item(&row)
    }

    pub async fn list_items(&self, limit: u32) -> Result<Vec<ReviewableItem>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM items ORDER BY updated_at DESC LIMIT ?1"),
                libsql::params![i64::from(limit)],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }
        Ok(items)
    }

    /// Conditionally move an item from `expected` to `new`.
    ///
    /// Returns `false` when zero rows were affected, meaning another writer
    /// changed the status first. Never retries.
    pub async fn update_item_status_if(
        &self,
        item_id: &str,
        item_type: ItemType,
        expected: ItemStatus,
        new: ItemStatus,
    ) -> Result<bool, DatabaseError> {
        let now = now();
        let changed = self
            .conn()
            .execute(
                "UPDATE items SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
                libsql::params![
                    vocab::to_native(item_type, new),
                    format_timestamp(&now),
                    item_id,
                    vocab::to_native(item_type, expected)
                ],
            )
            .await?;
        Ok(changed == 1)
    }
}
