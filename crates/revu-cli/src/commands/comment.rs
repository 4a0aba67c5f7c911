use serde_json::json;

use revu_engine::comments::CommentDraft;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommentCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revu comment`.
pub async fn handle(
    action: &CommentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CommentCommands::Add {
            item,
            text,
            comment_type,
            reply_to,
        } => {
            let actor = ctx.require_actor()?;
            let draft = CommentDraft {
                comment_type: *comment_type,
                parent_comment_id: reply_to.clone(),
                ..CommentDraft::new(text.as_str())
            };
            let comment = ctx.orchestrator.submit_comment(actor, item, draft).await?;
            output(&comment, flags.format)
        }
        CommentCommands::Resolve { id } => {
            let actor = ctx.require_actor()?;
            let resolved = ctx.orchestrator.resolve_comment(actor, id).await?;
            output(&json!({ "id": id, "resolved": resolved }), flags.format)
        }
        CommentCommands::List { item } => {
            let comments = ctx.orchestrator.list_comments(item).await?;
            output(&json!({ "comments": comments }), flags.format)
        }
    }
}
