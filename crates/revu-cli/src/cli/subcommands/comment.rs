use clap::Subcommand;

use revu_core::enums::CommentType;

use crate::cli::parse_snake;

/// Comment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// Add a comment to an item.
    Add {
        item: String,
        text: String,
        #[arg(long = "type", value_parser = parse_snake::<CommentType>)]
        comment_type: Option<CommentType>,
        /// Parent comment id.
        #[arg(long)]
        reply_to: Option<String>,
    },
    /// Resolve a rejection comment.
    Resolve { id: String },
    /// List an item's comments, oldest first.
    List { item: String },
}
