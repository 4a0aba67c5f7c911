use serde::Serialize;

use revu_engine::audit_log::AuditView;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuditResponse {
    item_id: String,
    page: u32,
    total: u64,
    entries: Vec<AuditView>,
}

/// Handle `revu audit`.
pub async fn handle(
    args: &AuditArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entries = ctx.orchestrator.list_audit_log(&args.item, args.page).await?;
    let total = ctx.service().db().count_audit(&args.item).await?;
    output(
        &AuditResponse {
            item_id: args.item.clone(),
            page: args.page,
            total,
            entries,
        },
        flags.format,
    )
}
