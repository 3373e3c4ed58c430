//! Harbor: gateway cache replay tool
//!
//! Main binary with subcommands:
//! - `replay`: feed recorded gateway dispatches through a client and print
//!   the resulting store contents
//! - `options`: print the effective client options

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse boolean from environment variable, accepting common truthy values.
/// Accepts "1", "true", "yes", "on" (case-insensitive) as true.
/// Accepts "0", "false", "no", "off", "" (case-insensitive) as false.
fn parse_bool_env(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(format!(
            "invalid boolean value '{}', expected 1/true/yes/on or 0/false/no/off",
            s
        )),
    }
}

mod options;
mod replay;

#[derive(Parser)]
#[command(name = "harbor")]
#[command(about = "Gateway cache replay tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Client option sources shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// JSON file with client options
    #[arg(long, env = "HARBOR_OPTIONS")]
    options: Option<PathBuf>,

    /// Override the session-wide cache switch
    #[arg(long, env = "HARBOR_CACHE_ENABLED", value_parser = parse_bool_env)]
    cache_enabled: Option<bool>,

    /// Override the guild store limit (0 disables the store)
    #[arg(long, env = "HARBOR_GUILD_LIMIT")]
    guild_limit: Option<usize>,

    /// Override the user store limit (0 disables the store)
    #[arg(long, env = "HARBOR_USER_LIMIT")]
    user_limit: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay newline-delimited gateway dispatches through a client
    Replay {
        /// File with one framed dispatch per line
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of shards to register before replaying
        #[arg(long, env = "HARBOR_SHARDS", default_value = "1")]
        shards: u32,

        /// Log failed dispatches and continue instead of stopping
        #[arg(long)]
        keep_going: bool,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Print the effective client options as JSON
    Options {
        #[command(flatten)]
        options: OptionArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "harbor=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            file,
            shards,
            keep_going,
            options,
        } => {
            let options = options::resolve(&options).await?;
            let summary = replay::run(&file, options, shards, keep_going).await?;
            print_json(&summary)
        }

        Commands::Options { options } => {
            let options = options::resolve(&options).await?;
            print_json(&options)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| miette::miette!("failed to serialize output: {}", e))?;
    println!("{}", json);
    Ok(())
}
