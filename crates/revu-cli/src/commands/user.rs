use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revu user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = ctx.service().db();
    match action {
        UserCommands::Add { name, role, org } => {
            let user = db.create_user(name, *role, org.as_deref()).await?;
            output(&user, flags.format)
        }
        UserCommands::List => {
            let users = db.list_users(ctx.limit(flags)).await?;
            output(&json!({ "users": users }), flags.format)
        }
        UserCommands::Deactivate { id } => {
            let deactivated = db.deactivate_user(id).await?;
            if !deactivated {
                anyhow::bail!("user '{id}' not found");
            }
            output(&json!({ "id": id, "deactivated": true }), flags.format)
        }
    }
}
