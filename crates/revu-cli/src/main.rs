use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;
mod policy;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("revu error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    if let cli::Commands::Schema(args) = &cli.command {
        init_tracing(flags.quiet, flags.verbose, "warn")?;
        return commands::schema::handle(args, &flags);
    }

    let config = revu_config::RevuConfig::load_with_dotenv().context("failed to load revu config")?;
    init_tracing(flags.quiet, flags.verbose, &config.general.log_level)?;

    let ctx = context::AppContext::init(config, &flags)
        .await
        .context("failed to initialize revu application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool, configured: &str) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("REVU_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
