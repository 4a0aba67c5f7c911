use anyhow::Context;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ItemCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revu item`.
pub async fn handle(
    action: &ItemCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = ctx.service().db();
    match action {
        ItemCommands::Create {
            title,
            item_type,
            org,
        } => {
            let created_by = ctx.actor.as_ref().map_or("system", |actor| actor.user_id.as_str());
            let item = db
                .create_item(*item_type, org.as_deref(), title, created_by)
                .await?;
            output(&item, flags.format)
        }
        ItemCommands::Get { id } => {
            let item = db
                .get_item(id)
                .await
                .with_context(|| format!("failed to load item '{id}'"))?;
            let cycles = db.list_cycles(id).await?;
            output(&json!({ "item": item, "cycles": cycles }), flags.format)
        }
        ItemCommands::List => {
            let items = db.list_items(ctx.limit(flags)).await?;
            output(&json!({ "items": items }), flags.format)
        }
    }
}
