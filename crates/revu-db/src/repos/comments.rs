//! Comment repository.

use chrono::{DateTime, Utc};

use revu_core::entities::Comment;
use revu_core::enums::{ActorRole, CommentType, ReviewAction};
use revu_core::ids::PREFIX_COMMENT;

use crate::RevuDb;
use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_flag, get_opt_string, now, parse_datetime, parse_enum,
    parse_optional_datetime, parse_optional_enum, to_stored_precision,
};

const SELECT_COLS: &str = "id, item_id, author_id, author_name, author_role, text, comment_type, \
     action_type, related_status_change, mentions, is_resolved, resolved_by, resolved_at, \
     parent_comment_id, created_at";

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    let mentions: Vec<String> = serde_json::from_str(&row.get::<String>(9)?)
        .map_err(|e| DatabaseError::Query(format!("Invalid mentions JSON: {e}")))?;
    Ok(Comment {
        id: row.get(0)?,
        item_id: row.get(1)?,
        author_id: row.get(2)?,
        author_name: row.get(3)?,
        author_role: parse_enum(&row.get::<String>(4)?)?,
        text: row.get(5)?,
        comment_type: parse_enum(&row.get::<String>(6)?)?,
        action_type: parse_optional_enum(get_opt_string(row, 7)?.as_deref())?,
        related_status_change: get_opt_string(row, 8)?,
        mentions,
        is_resolved: get_flag(row, 10)?,
        resolved_by: get_opt_string(row, 11)?,
        resolved_at: parse_optional_datetime(get_opt_string(row, 12)?.as_deref())?,
        parent_comment_id: get_opt_string(row, 13)?,
        created_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

/// Parameters for a new comment.
#[derive(Debug, Clone)]
pub struct NewComment<'a> {
    pub item_id: &'a str,
    pub author_id: &'a str,
    pub author_name: &'a str,
    pub author_role: ActorRole,
    pub text: &'a str,
    pub comment_type: CommentType,
    pub action_type: Option<ReviewAction>,
    pub related_status_change: Option<&'a str>,
    pub mentions: &'a [String],
    pub parent_comment_id: Option<&'a str>,
}

impl RevuDb {
    pub async fn insert_comment(&self, new: NewComment<'_>) -> Result<Comment, DatabaseError> {
        let id = self.generate_id(PREFIX_COMMENT).await?;
        let now = now();
        let mentions = serde_json::to_string(new.mentions)
            .map_err(|e| DatabaseError::Other(e.into()))?;

        self.conn()
            .execute(
                "INSERT INTO comments (id, item_id, author_id, author_name, author_role, text, \
                 comment_type, action_type, related_status_change, mentions, parent_comment_id, \
                 created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                libsql::params![
                    id.as_str(),
                    new.item_id,
                    new.author_id,
                    new.author_name,
                    new.author_role.as_str(),
                    new.text,
                    new.comment_type.as_str(),
                    new.action_type.map(ReviewAction::as_str),
                    new.related_status_change,
                    mentions,
                    new.parent_comment_id,
                    format_timestamp(&now)
                ],
            )
            .await?;

        Ok(Comment {
            id,
            item_id: new.item_id.to_string(),
            author_id: new.author_id.to_string(),
            author_name: new.author_name.to_string(),
            author_role: new.author_role,
            text: new.text.to_string(),
            comment_type: new.comment_type,
            action_type: new.action_type,
            related_status_change: new.related_status_change.map(String::from),
            mentions: new.mentions.to_vec(),
            is_resolved: false,
            resolved_by: None,
            resolved_at: None,
            parent_comment_id: new.parent_comment_id.map(String::from),
            created_at: now,
        })
    }

    pub async fn get_comment(&self, id: &str) -> Result<Comment, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM comments WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_comment(&row)
    }

    /// All comments on an item in chronological order.
    pub async fn list_comments(&self, item_id: &str) -> Result<Vec<Comment>, DatabaseError> {
        self.query_comments(
            &format!(
                "SELECT {SELECT_COLS} FROM comments WHERE item_id = ?1 \
                 ORDER BY created_at, rowid"
            ),
            item_id,
        )
        .await
    }

    /// Unresolved rejection comments on an item, oldest first.
    pub async fn list_unresolved_rejections(
        &self,
        item_id: &str,
    ) -> Result<Vec<Comment>, DatabaseError> {
        self.query_comments(
            &format!(
                "SELECT {SELECT_COLS} FROM comments \
                 WHERE item_id = ?1 AND comment_type = 'rejection' AND is_resolved = 0 \
                 ORDER BY created_at, rowid"
            ),
            item_id,
        )
        .await
    }

    pub async fn has_unresolved_rejections(&self, item_id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT EXISTS (SELECT 1 FROM comments \
                 WHERE item_id = ?1 AND comment_type = 'rejection' AND is_resolved = 0)",
                [item_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_flag(&row, 0)
    }

    /// Mark an unresolved rejection comment resolved.
    ///
    /// Returns `false` when nothing changed: the comment is already resolved,
    /// is not a rejection, or does not exist.
    pub async fn resolve_comment(
        &self,
        comment_id: &str,
        resolved_by: &str,
        resolved_at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE comments SET is_resolved = 1, resolved_by = ?1, resolved_at = ?2 \
                 WHERE id = ?3 AND comment_type = 'rejection' AND is_resolved = 0",
                libsql::params![
                    resolved_by,
                    format_timestamp(&to_stored_precision(resolved_at)),
                    comment_id
                ],
            )
            .await?;
        Ok(changed == 1)
    }

    async fn query_comments(&self, sql: &str, item_id: &str) -> Result<Vec<Comment>, DatabaseError> {
        let mut rows = self.conn().query(sql, [item_id]).await?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next().await? {
            comments.push(row_to_comment(&row)?);
        }
        Ok(comments)
    }
}
