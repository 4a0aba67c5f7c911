//! Status enums, actions, roles, and comment kinds for revu.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! The canonical item lifecycle is driven by [`ReviewAction`]: every action has
//! exactly one legal source state and one target state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ItemType
// ---------------------------------------------------------------------------

/// Kind of record moving through review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// A piece of editorial content.
    Content,
    /// A marketplace listing.
    Service,
    /// A business-directory record.
    Business,
}

impl ItemType {
    pub const ALL: [Self; 3] = [Self::Content, Self::Service, Self::Business];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Service => "service",
            Self::Business => "business",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ItemStatus
// ---------------------------------------------------------------------------

/// Canonical lifecycle status of a reviewable item.
///
/// ```text
/// draft → pending_review → published → archived → published (restore)
///                        → rejected  → pending_review (resubmit)
///                        → draft (send back)
///         published → draft (unpublish)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Draft,
    PendingReview,
    Published,
    Rejected,
    Archived,
}

impl ItemStatus {
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::PendingReview,
        Self::Published,
        Self::Rejected,
        Self::Archived,
    ];

    /// Actions that may be taken from this state.
    #[must_use]
    pub const fn allowed_actions(self) -> &'static [ReviewAction] {
        match self {
            Self::Draft => &[ReviewAction::Submit],
            Self::PendingReview => &[
                ReviewAction::Approve,
                ReviewAction::Reject,
                ReviewAction::SendBack,
            ],
            Self::Published => &[ReviewAction::Unpublish, ReviewAction::Archive],
            Self::Rejected => &[ReviewAction::Resubmit],
            Self::Archived => &[ReviewAction::Restore],
        }
    }

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft | Self::Rejected => &[Self::PendingReview],
            Self::PendingReview => &[Self::Published, Self::Rejected, Self::Draft],
            Self::Published => &[Self::Draft, Self::Archived],
            Self::Archived => &[Self::Published],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Published => "published",
            Self::Rejected => "rejected",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReviewAction
// ---------------------------------------------------------------------------

/// A workflow action a caller can request on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Submit,
    Approve,
    Reject,
    SendBack,
    Resubmit,
    Unpublish,
    Archive,
    Restore,
}

impl ReviewAction {
    pub const ALL: [Self; 8] = [
        Self::Submit,
        Self::Approve,
        Self::Reject,
        Self::SendBack,
        Self::Resubmit,
        Self::Unpublish,
        Self::Archive,
        Self::Restore,
    ];

    /// The only state this action may be applied from.
    #[must_use]
    pub const fn source(self) -> ItemStatus {
        match self {
            Self::Submit => ItemStatus::Draft,
            Self::Approve | Self::Reject | Self::SendBack => ItemStatus::PendingReview,
            Self::Resubmit => ItemStatus::Rejected,
            Self::Unpublish | Self::Archive => ItemStatus::Published,
            Self::Restore => ItemStatus::Archived,
        }
    }

    /// The state the item lands in when this action is applied.
    #[must_use]
    pub const fn target(self) -> ItemStatus {
        match self {
            Self::Submit | Self::Resubmit => ItemStatus::PendingReview,
            Self::Approve | Self::Restore => ItemStatus::Published,
            Self::Reject => ItemStatus::Rejected,
            Self::SendBack | Self::Unpublish => ItemStatus::Draft,
            Self::Archive => ItemStatus::Archived,
        }
    }

    /// Target state when applied from `from`, or `None` if the action is illegal there.
    #[must_use]
    pub fn apply(self, from: ItemStatus) -> Option<ItemStatus> {
        (self.source() == from).then_some(self.target())
    }

    /// Comment type that must be durably recorded before this action is applied.
    #[must_use]
    pub const fn required_comment(self) -> Option<CommentType> {
        match self {
            Self::Reject => Some(CommentType::Rejection),
            Self::SendBack => Some(CommentType::Revision),
            _ => None,
        }
    }

    /// Actions on which a non-internal caller must belong to the item's organization.
    #[must_use]
    pub const fn requires_org_match(self) -> bool {
        matches!(
            self,
            Self::Approve | Self::Reject | Self::SendBack | Self::Unpublish | Self::Archive
        )
    }

    /// Whether applying this action starts (or restarts) a review cycle.
    #[must_use]
    pub const fn enters_review(self) -> bool {
        matches!(self, Self::Submit | Self::Resubmit)
    }

    /// How the open review cycle is closed when this action is applied.
    #[must_use]
    pub const fn cycle_outcome(self) -> Option<CycleStatus> {
        match self {
            Self::Approve => Some(CycleStatus::Approved),
            Self::Reject => Some(CycleStatus::Rejected),
            Self::SendBack => Some(CycleStatus::SentBack),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::SendBack => "send_back",
            Self::Resubmit => "resubmit",
            Self::Unpublish => "unpublish",
            Self::Archive => "archive",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CycleStatus
// ---------------------------------------------------------------------------

/// Status of a single review cycle.
///
/// ```text
/// pending → approved
///         → rejected
///         → sent_back
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Pending,
    Approved,
    Rejected,
    SentBack,
}

impl CycleStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected, Self::SentBack],
            Self::Approved | Self::Rejected | Self::SentBack => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::SentBack => "sent_back",
        }
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssignmentStatus
// ---------------------------------------------------------------------------

/// Status of a reviewer assignment.
///
/// ```text
/// assigned → accepted → in_progress → completed
///          → in_progress
/// (any active) → reassigned | completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    Accepted,
    InProgress,
    Reassigned,
    Completed,
}

impl AssignmentStatus {
    /// Statuses counted as live work for a reviewer.
    pub const ACTIVE: [Self; 3] = [Self::Assigned, Self::Accepted, Self::InProgress];

    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Assigned => &[
                Self::Accepted,
                Self::InProgress,
                Self::Reassigned,
                Self::Completed,
            ],
            Self::Accepted => &[Self::InProgress, Self::Reassigned, Self::Completed],
            Self::InProgress => &[Self::Reassigned, Self::Completed],
            Self::Reassigned | Self::Completed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Assigned | Self::Accepted | Self::InProgress)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Reassigned => "reassigned",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssignmentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    Primary,
}

impl AssignmentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
        }
    }
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CommentType
// ---------------------------------------------------------------------------

/// Kind of annotation attached to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CommentType {
    Rejection,
    Revision,
    Approval,
    ActionNote,
    System,
    General,
    Review,
}

impl CommentType {
    /// Only rejection comments carry resolution state.
    #[must_use]
    pub const fn is_resolvable(self) -> bool {
        matches!(self, Self::Rejection)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rejection => "rejection",
            Self::Revision => "revision",
            Self::Approval => "approval",
            Self::ActionNote => "action_note",
            Self::System => "system",
            Self::General => "general",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for CommentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActorRole
// ---------------------------------------------------------------------------

/// Role of the actor invoking a core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Platform administrator.
    Admin,
    /// Internal reviewer on the platform team.
    Reviewer,
    /// Administrator of a single organization.
    OrgAdmin,
    /// Organization member submitting items.
    Submitter,
}

impl ActorRole {
    /// Internal actors act across organizations and form the reviewer pool.
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Admin | Self::Reviewer)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Reviewer => "reviewer",
            Self::OrgAdmin => "org_admin",
            Self::Submitter => "submitter",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit log.
///
/// Stored as `snake_case`; [`AuditAction::label`] is applied at read time so
/// relabeling never requires a data migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Submit,
    Approve,
    Reject,
    SendBack,
    Resubmit,
    Unpublish,
    Archive,
    Restore,
    Reassign,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::SendBack => "send_back",
            Self::Resubmit => "resubmit",
            Self::Unpublish => "unpublish",
            Self::Archive => "archive",
            Self::Restore => "restore",
            Self::Reassign => "reassign",
        }
    }

    /// Human-readable phrase for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submit => "Submitted for Review",
            Self::Approve => "Approved",
            Self::Reject => "Rejected",
            Self::SendBack => "Sent Back for Revision",
            Self::Resubmit => "Resubmitted for Review",
            Self::Unpublish => "Unpublished",
            Self::Archive => "Archived",
            Self::Restore => "Restored to Published",
            Self::Reassign => "Reviewer Reassigned",
        }
    }
}

impl From<ReviewAction> for AuditAction {
    fn from(action: ReviewAction) -> Self {
        match action {
            ReviewAction::Submit => Self::Submit,
            ReviewAction::Approve => Self::Approve,
            ReviewAction::Reject => Self::Reject,
            ReviewAction::SendBack => Self::SendBack,
            ReviewAction::Resubmit => Self::Resubmit,
            ReviewAction::Unpublish => Self::Unpublish,
            ReviewAction::Archive => Self::Archive,
            ReviewAction::Restore => Self::Restore,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(item_type_business, ItemType, ItemType::Business, "business");
    test_serde_roundtrip!(
        status_pending_review,
        ItemStatus,
        ItemStatus::PendingReview,
        "pending_review"
    );
    test_serde_roundtrip!(action_send_back, ReviewAction, ReviewAction::SendBack, "send_back");
    test_serde_roundtrip!(cycle_sent_back, CycleStatus, CycleStatus::SentBack, "sent_back");
    test_serde_roundtrip!(
        assignment_in_progress,
        AssignmentStatus,
        AssignmentStatus::InProgress,
        "in_progress"
    );
    test_serde_roundtrip!(
        comment_action_note,
        CommentType,
        CommentType::ActionNote,
        "action_note"
    );
    test_serde_roundtrip!(role_org_admin, ActorRole, ActorRole::OrgAdmin, "org_admin");
    test_serde_roundtrip!(audit_reassign, AuditAction, AuditAction::Reassign, "reassign");

    #[rstest]
    #[case(ReviewAction::Submit, ItemStatus::Draft, ItemStatus::PendingReview)]
    #[case(ReviewAction::Approve, ItemStatus::PendingReview, ItemStatus::Published)]
    #[case(ReviewAction::Reject, ItemStatus::PendingReview, ItemStatus::Rejected)]
    #[case(ReviewAction::SendBack, ItemStatus::PendingReview, ItemStatus::Draft)]
    #[case(ReviewAction::Resubmit, ItemStatus::Rejected, ItemStatus::PendingReview)]
    #[case(ReviewAction::Unpublish, ItemStatus::Published, ItemStatus::Draft)]
    #[case(ReviewAction::Archive, ItemStatus::Published, ItemStatus::Archived)]
    #[case(ReviewAction::Restore, ItemStatus::Archived, ItemStatus::Published)]
    fn action_table(
        #[case] action: ReviewAction,
        #[case] from: ItemStatus,
        #[case] to: ItemStatus,
    ) {
        assert_eq!(action.apply(from), Some(to));
        assert!(from.can_transition_to(to));
        assert!(from.allowed_actions().contains(&action));
    }

    #[test]
    fn actions_illegal_outside_their_source_state() {
        for action in ReviewAction::ALL {
            for status in ItemStatus::ALL {
                if status != action.source() {
                    assert_eq!(action.apply(status), None, "{action} from {status}");
                    assert!(!status.allowed_actions().contains(&action));
                }
            }
        }
    }

    #[test]
    fn allowed_next_states_agree_with_actions() {
        for status in ItemStatus::ALL {
            let mut from_actions: Vec<ItemStatus> = status
                .allowed_actions()
                .iter()
                .map(|a| a.target())
                .collect();
            from_actions.sort_by_key(|s| s.as_str());
            from_actions.dedup();
            let mut next: Vec<ItemStatus> = status.allowed_next_states().to_vec();
            next.sort_by_key(|s| s.as_str());
            assert_eq!(from_actions, next, "{status}");
        }
    }

    #[test]
    fn justification_requirements() {
        assert_eq!(
            ReviewAction::Reject.required_comment(),
            Some(CommentType::Rejection)
        );
        assert_eq!(
            ReviewAction::SendBack.required_comment(),
            Some(CommentType::Revision)
        );
        assert_eq!(ReviewAction::Approve.required_comment(), None);
        assert_eq!(ReviewAction::Resubmit.required_comment(), None);
    }

    #[test]
    fn org_match_actions() {
        let gated: Vec<_> = ReviewAction::ALL
            .into_iter()
            .filter(|a| a.requires_org_match())
            .collect();
        assert_eq!(
            gated,
            vec![
                ReviewAction::Approve,
                ReviewAction::Reject,
                ReviewAction::SendBack,
                ReviewAction::Unpublish,
                ReviewAction::Archive,
            ]
        );
    }

    #[test]
    fn cycle_terminal_states() {
        assert!(CycleStatus::Pending.can_transition_to(CycleStatus::Rejected));
        assert!(CycleStatus::Approved.allowed_next_states().is_empty());
        assert!(!CycleStatus::Rejected.is_open());
    }

    #[test]
    fn assignment_transitions() {
        assert!(AssignmentStatus::Assigned.can_transition_to(AssignmentStatus::Accepted));
        assert!(AssignmentStatus::Accepted.can_transition_to(AssignmentStatus::InProgress));
        assert!(!AssignmentStatus::InProgress.can_transition_to(AssignmentStatus::Accepted));
        assert!(AssignmentStatus::Reassigned.allowed_next_states().is_empty());
        assert!(!AssignmentStatus::Completed.is_active());
        assert!(AssignmentStatus::ACTIVE.iter().all(|s| s.is_active()));
    }

    #[test]
    fn audit_labels() {
        assert_eq!(AuditAction::Submit.label(), "Submitted for Review");
        assert_eq!(AuditAction::Restore.label(), "Restored to Published");
        assert_eq!(
            AuditAction::from(ReviewAction::SendBack),
            AuditAction::SendBack
        );
    }

    #[test]
    fn internal_roles() {
        assert!(ActorRole::Admin.is_internal());
        assert!(ActorRole::Reviewer.is_internal());
        assert!(!ActorRole::OrgAdmin.is_internal());
        assert!(!ActorRole::Submitter.is_internal());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", ItemType::Service), "service");
        assert_eq!(format!("{}", ItemStatus::PendingReview), "pending_review");
        assert_eq!(format!("{}", ReviewAction::SendBack), "send_back");
        assert_eq!(format!("{}", CycleStatus::Pending), "pending");
        assert_eq!(format!("{}", AssignmentStatus::Reassigned), "reassigned");
        assert_eq!(format!("{}", AssignmentType::Primary), "primary");
        assert_eq!(format!("{}", CommentType::Rejection), "rejection");
        assert_eq!(format!("{}", ActorRole::Reviewer), "reviewer");
        assert_eq!(format!("{}", AuditAction::Reassign), "reassign");
    }
}
