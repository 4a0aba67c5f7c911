//! # revu-engine
//!
//! The review workflow core. `ReviewService` wraps `RevuDb` and the review
//! tuning from `revu-config`; each concern is an `impl ReviewService` block in
//! its own module:
//!
//! - [`audit_log`]: append-only audit entries and labelled reads
//! - [`comments`]: typed comments, mentions, rejection resolution
//! - [`directory`]: the ranked reviewer pool
//! - [`assignment`]: auto-assignment and reassignment
//! - [`workflow`]: the compare-and-swap state machine
//!
//! [`orchestrator::ReviewOrchestrator`] sits on top and sequences
//! authorization, comment-then-transition ordering, and notifications.

pub mod assignment;
pub mod audit_log;
pub mod authz;
pub mod comments;
pub mod directory;
pub mod error;
pub mod notify;
pub mod orchestrator;
pub mod workflow;

#[cfg(test)]
mod test_support;

use revu_config::ReviewConfig;
use revu_db::RevuDb;

pub use error::WorkflowError;

/// Review core over a database handle.
pub struct ReviewService {
    db: RevuDb,
    config: ReviewConfig,
}

impl ReviewService {
    #[must_use]
    pub const fn new(db: RevuDb, config: ReviewConfig) -> Self {
        Self { db, config }
    }

    /// Open a local database (`":memory:"` for tests) and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Persistence` if the database cannot be opened.
    pub async fn open_local(path: &str, config: ReviewConfig) -> Result<Self, WorkflowError> {
        let db = RevuDb::open_local(path).await?;
        Ok(Self::new(db, config))
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RevuDb {
        &self.db
    }

    #[must_use]
    pub const fn config(&self) -> &ReviewConfig {
        &self.config
    }
}
