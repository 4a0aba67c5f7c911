//! Review workflow tuning.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_assignment_due_days() -> u32 {
    3
}

const fn default_audit_page_size() -> u32 {
    20
}

const fn default_max_cycle_upsert_attempts() -> u32 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// Days between assignment and its informational due date.
    #[serde(default = "default_assignment_due_days")]
    pub assignment_due_days: u32,

    /// Entries per page for audit log listings.
    #[serde(default = "default_audit_page_size")]
    pub audit_page_size: u32,

    /// Attempts at the open-cycle upsert before giving up on a conflict.
    #[serde(default = "default_max_cycle_upsert_attempts")]
    pub max_cycle_upsert_attempts: u32,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            assignment_due_days: default_assignment_due_days(),
            audit_page_size: default_audit_page_size(),
            max_cycle_upsert_attempts: default_max_cycle_upsert_attempts(),
        }
    }
}

impl ReviewConfig {
    /// Reject values the engine cannot operate with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first zero-valued field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("review.assignment_due_days", self.assignment_due_days),
            ("review.audit_page_size", self.audit_page_size),
            (
                "review.max_cycle_upsert_attempts",
                self.max_cycle_upsert_attempts,
            ),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }
}
