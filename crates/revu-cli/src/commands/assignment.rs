use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssignmentCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revu assignment`.
pub async fn handle(
    action: &AssignmentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AssignmentCommands::Show { item } => {
            let assignment = ctx.orchestrator.get_reviewer_assignment(item).await?;
            output(
                &json!({ "item_id": item, "assignment": assignment }),
                flags.format,
            )
        }
        AssignmentCommands::Accept { id } => {
            let actor = ctx.require_actor()?;
            let assignment = ctx.service().accept_assignment(actor, id).await?;
            output(&assignment, flags.format)
        }
        AssignmentCommands::Start { id } => {
            let actor = ctx.require_actor()?;
            let assignment = ctx.service().start_assignment(actor, id).await?;
            output(&assignment, flags.format)
        }
    }
}
