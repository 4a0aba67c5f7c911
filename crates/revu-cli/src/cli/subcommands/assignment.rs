use clap::Subcommand;

/// Assignment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AssignmentCommands {
    /// Show the active assignment of an item's open review.
    Show { item: String },
    /// Accept an assignment made to you.
    Accept { id: String },
    /// Start work on an assignment made to you.
    Start { id: String },
}
