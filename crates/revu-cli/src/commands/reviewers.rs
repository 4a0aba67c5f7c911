use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReviewersArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revu reviewers`.
pub async fn handle(
    args: &ReviewersArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut reviewers = ctx
        .orchestrator
        .list_eligible_reviewers(args.org.as_deref())
        .await?;
    reviewers.truncate(usize::try_from(ctx.limit(flags)).unwrap_or(usize::MAX));
    output(&json!({ "reviewers": reviewers }), flags.format)
}
