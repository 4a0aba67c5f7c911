use crate::cli::GlobalFlags;
use crate::cli::root_commands::TransitionArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `revu transition`. The response is printed either way; a
/// transition that did not land also exits non-zero.
pub async fn handle(
    args: &TransitionArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let response = ctx
        .orchestrator
        .transition_from(
            actor,
            &args.item,
            args.action,
            args.expect,
            args.note.as_deref(),
        )
        .await;
    output(&response, flags.format)?;

    match response.error {
        Some(failure) if !response.applied => {
            anyhow::bail!("{} not applied: {}", args.action, failure.message())
        }
        _ => Ok(()),
    }
}
