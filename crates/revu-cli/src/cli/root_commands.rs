use clap::Args;
use clap::Subcommand;

use revu_core::enums::{ItemStatus, ReviewAction};

use crate::cli::parse_snake;
use crate::cli::subcommands::{AssignmentCommands, CommentCommands, ItemCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Directory users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Reviewable items.
    Item {
        #[command(subcommand)]
        action: ItemCommands,
    },
    /// Apply a workflow action to an item.
    Transition(TransitionArgs),
    /// Item comments.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// View an item's audit log.
    Audit(AuditArgs),
    /// List eligible reviewers, best match first.
    Reviewers(ReviewersArgs),
    /// Reviewer assignments.
    Assignment {
        #[command(subcommand)]
        action: AssignmentCommands,
    },
    /// Move an item's open review to another reviewer.
    Reassign(ReassignArgs),
    /// Dump JSON schema for an entity type.
    Schema(SchemaArgs),
}

/// Arguments for `revu transition`.
#[derive(Clone, Debug, Args)]
pub struct TransitionArgs {
    pub item: String,
    /// submit, approve, reject, send-back, resubmit, unpublish, archive, restore
    #[arg(value_parser = parse_snake::<ReviewAction>)]
    pub action: ReviewAction,
    /// Notes; required as the justification for reject and send-back.
    #[arg(long)]
    pub note: Option<String>,
    /// Status you last saw; the action only lands if the item is still in it.
    #[arg(long, value_parser = parse_snake::<ItemStatus>)]
    pub expect: Option<ItemStatus>,
}

/// Arguments for `revu audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    pub item: String,
    /// Zero-based page number.
    #[arg(long, default_value_t = 0)]
    pub page: u32,
}

/// Arguments for `revu reviewers`.
#[derive(Clone, Debug, Args)]
pub struct ReviewersArgs {
    /// Organization of the item being staffed.
    #[arg(long)]
    pub org: Option<String>,
}

/// Arguments for `revu reassign`.
#[derive(Clone, Debug, Args)]
pub struct ReassignArgs {
    pub item: String,
    pub reviewer: String,
}

/// Arguments for `revu schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Entity name, e.g. `item`, `comment`, `audit`.
    pub entity: String,
}
