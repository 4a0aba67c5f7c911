use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `revu` binary.
#[derive(Debug, Parser)]
#[command(name = "revu", version, about = "revu - review and approval workflow")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Act as this user id
    #[arg(long = "as", global = true, value_name = "USER_ID")]
    pub actor: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            actor: self.actor.clone(),
        }
    }
}

/// Parse a `snake_case` (or kebab-case) domain enum value.
pub fn parse_snake<T: serde::de::DeserializeOwned>(value: &str) -> Result<T, String> {
    let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| format!("unrecognized value '{value}'"))
}
