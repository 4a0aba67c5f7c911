//! Typed audit metadata payloads.
//!
//! Audit entries carry a free-form `metadata` JSON blob. These types give the
//! common shapes a schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reviewer reference embedded in metadata.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewerRef {
    pub id: String,
    pub name: String,
}

/// Metadata for a transition entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TransitionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_reviewer: Option<ReviewerRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    /// Caller-supplied extras, merged verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

/// Metadata for `AuditAction::Reassign`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReassignMetadata {
    pub previous_reviewer: Option<ReviewerRef>,
    pub new_reviewer: ReviewerRef,
}
