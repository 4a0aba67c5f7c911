use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Item { action } => commands::item::handle(&action, ctx, flags).await,
        Commands::Transition(args) => commands::transition::handle(&args, ctx, flags).await,
        Commands::Comment { action } => commands::comment::handle(&action, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Reviewers(args) => commands::reviewers::handle(&args, ctx, flags).await,
        Commands::Assignment { action } => {
            commands::assignment::handle(&action, ctx, flags).await
        }
        Commands::Reassign(args) => commands::reassign::handle(&args, ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
