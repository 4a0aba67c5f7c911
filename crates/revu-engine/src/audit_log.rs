//! Append-only audit log with human-readable labels applied at read time.

use serde::Serialize;

use revu_core::entities::AuditEntry;
use revu_core::enums::{AuditAction, ItemStatus};
use revu_core::identity::ActorContext;
use revu_core::ids::PREFIX_AUDIT;
use revu_db::helpers::now;

use crate::{ReviewService, WorkflowError};

/// Fields of a new audit entry; id and timestamp are assigned on append.
#[derive(Debug, Clone)]
pub struct AuditRecord<'a> {
    pub review_cycle_id: Option<&'a str>,
    pub item_id: &'a str,
    pub action: AuditAction,
    pub actor: &'a ActorContext,
    pub previous_status: Option<ItemStatus>,
    pub new_status: Option<ItemStatus>,
    pub reason: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub metadata: Option<serde_json::Value>,
}

/// A stored entry paired with its display label.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuditView {
    #[serde(flatten)]
    pub entry: AuditEntry,
    pub label: &'static str,
}

impl From<AuditEntry> for AuditView {
    fn from(entry: AuditEntry) -> Self {
        let label = entry.action.label();
        Self { entry, label }
    }
}

impl ReviewService {
    /// Append an entry. There is no update or delete counterpart.
    pub async fn append_audit(&self, record: AuditRecord<'_>) -> Result<AuditEntry, WorkflowError> {
        let entry = AuditEntry {
            id: self.db.generate_id(PREFIX_AUDIT).await?,
            review_cycle_id: record.review_cycle_id.map(String::from),
            item_id: record.item_id.to_string(),
            action: record.action,
            action_by: record.actor.user_id.clone(),
            action_by_name: record.actor.name.clone(),
            previous_status: record.previous_status,
            new_status: record.new_status,
            reason: record.reason.map(String::from),
            notes: record.notes.map(String::from),
            metadata: record.metadata,
            created_at: now(),
        };
        self.db.append_audit(&entry).await?;
        tracing::debug!(item_id = %entry.item_id, action = %entry.action, "audit entry appended");
        Ok(entry)
    }

    /// Entries for an item, newest first.
    pub async fn list_audit(
        &self,
        item_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<AuditView>, WorkflowError> {
        let entries = self.db.list_audit(item_id, limit, offset).await?;
        Ok(entries.into_iter().map(AuditView::from).collect())
    }

    /// Zero-based page of an item's audit log, sized by `review.audit_page_size`.
    pub async fn list_audit_page(
        &self,
        item_id: &str,
        page: u32,
    ) -> Result<Vec<AuditView>, WorkflowError> {
        let size = self.config.audit_page_size;
        self.list_audit(item_id, size, page.saturating_mul(size))
            .await
    }
}
