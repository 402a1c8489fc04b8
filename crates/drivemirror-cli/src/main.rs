//! drivemirror CLI - Copy Google Drive folders into Cloud Storage buckets
//!
//! Provides commands for:
//! - Copying the files of one folder to a bucket root (`flat`)
//! - Mirroring a folder tree, looked up by name, into a bucket (`mirror`)
//! - Inspecting the configuration (`config`)

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    config::ConfigCommand, flat::FlatCommand, load_config, mirror::MirrorCommand, RunContext,
};
use output::{get_formatter, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "drivemirror",
    version,
    about = "Copy Google Drive folders into Cloud Storage buckets"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Copy the files in a folder (by ID) to the root of a bucket
    Flat(FlatCommand),
    /// Copy a folder tree (by name) into a bucket
    Mirror(MirrorCommand),
    /// View the configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Tracing filter for the given flags when `RUST_LOG` is unset
fn log_filter(verbose: u8, quiet: bool, configured: &str) -> &str {
    match verbose {
        0 if quiet => "warn",
        0 => configured,
        1 => "debug",
        _ => "trace",
    }
}

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = OutputFormat::from_flag(cli.json);
    let formatter = get_formatter(cli.json);

    let loaded = load_config(cli.config.as_deref());
    let configured_level = match &loaded {
        Ok((_, config)) => config.logging.level.as_str(),
        Err(_) => "info",
    };
    init_tracing(log_filter(cli.verbose, cli.quiet, configured_level));

    let (config_path, config) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            formatter.error(&format!("{e:#}"));
            return ExitCode::FAILURE;
        }
    };

    let ctx = RunContext {
        format,
        quiet: cli.quiet,
        config_path,
        config,
    };

    let result = match cli.command {
        Commands::Flat(cmd) => cmd.execute(&ctx).await,
        Commands::Mirror(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await.map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            formatter.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
