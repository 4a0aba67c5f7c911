//! User directory repository.

use revu_core::entities::User;
use revu_core::enums::ActorRole;
use revu_core::ids::PREFIX_USER;

use crate::RevuDb;
use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_flag, get_opt_string, now, parse_datetime, parse_enum,
};

const SELECT_COLS: &str = "id, name, role, organization_id, is_active, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        role: parse_enum(&row.get::<String>(2)?)?,
        organization_id: get_opt_string(row, 3)?,
        is_active: get_flag(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl RevuDb {
    pub async fn create_user(
        &self,
        name: &str,
        role: ActorRole,
        organization_id: Option<&str>,
    ) -> Result<User, DatabaseError> {
        let now = now();
        let id = self.generate_id(PREFIX_USER).await?;

        self.conn()
            .execute(
                &format!("INSERT INTO users ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, 1, ?5)"),
                libsql::params![
                    id.as_str(),
                    name,
                    role.as_str(),
                    organization_id,
                    format_timestamp(&now)
                ],
            )
            .await?;

        Ok(User {
            id,
            name: name.to_string(),
            role,
            organization_id: organization_id.map(String::from),
            is_active: true,
            created_at: now,
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_user(&row)
    }

    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users ORDER BY rowid LIMIT ?1"),
                libsql::params![i64::from(limit)],
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// Mark a user inactive. Inactive users leave the reviewer pool.
    pub async fn deactivate_user(&self, id: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute("UPDATE users SET is_active = 0 WHERE id = ?1", [id])
            .await?;
        Ok(changed == 1)
    }
}
