use clap::Subcommand;

use revu_core::enums::ActorRole;

use crate::cli::parse_snake;

/// User directory commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user.
    Add {
        name: String,
        /// admin, reviewer, org-admin, submitter
        #[arg(long, value_parser = parse_snake::<ActorRole>)]
        role: ActorRole,
        #[arg(long)]
        org: Option<String>,
    },
    /// List users.
    List,
    /// Deactivate a user; they leave the reviewer pool.
    Deactivate { id: String },
}
