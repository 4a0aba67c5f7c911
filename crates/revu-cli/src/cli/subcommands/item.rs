use clap::Subcommand;

use revu_core::enums::ItemType;

use crate::cli::parse_snake;

/// Reviewable item commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ItemCommands {
    /// Create an item in draft.
    Create {
        title: String,
        /// content, service, business
        #[arg(long = "type", value_parser = parse_snake::<ItemType>)]
        item_type: ItemType,
        #[arg(long)]
        org: Option<String>,
    },
    /// Get an item with its review cycles.
    Get { id: String },
    /// List items.
    List,
}
