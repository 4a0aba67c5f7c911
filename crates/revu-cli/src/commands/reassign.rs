use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReassignArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revu reassign`.
pub async fn handle(
    args: &ReassignArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let reassigned = ctx
        .orchestrator
        .reassign(actor, &args.item, &args.reviewer)
        .await?;
    output(
        &json!({ "item_id": args.item, "reviewer_id": args.reviewer, "reassigned": reassigned }),
        flags.format,
    )
}
