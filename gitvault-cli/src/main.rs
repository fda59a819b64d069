//! GitVault CLI - Command line interface for GitVault
//!
//! Mirrors a GitHub user's repositories into local bare clones.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use gitvault_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::SyncArgs;

/// GitVault: keep bare mirrors of your GitHub repositories
#[derive(Parser, Debug)]
#[command(name = "gitvault")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    /// Settings file (defaults to ~/.config/gitvault/config.toml if present)
    #[arg(long, global = true, env = "GITVAULT_CONFIG")]
    config: Option<PathBuf>,

    /// JSON file with github_token and github_username (overrides config and env)
    #[arg(long, global = true, env = "GITVAULT_SECRETS_FILE")]
    secrets_file: Option<PathBuf>,

    /// Directory holding the mirrors (overrides config and env)
    #[arg(long, global = true, env = "GITVAULT_BACKUP_DIR")]
    backup_dir: Option<PathBuf>,

    /// GitHub API base URL (overrides config and env)
    #[arg(long, global = true, env = "GITVAULT_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone new repositories and update existing mirrors (default)
    Sync(SyncArgs),

    /// Show current configuration
    Config,

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human readable lines
    Text,
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "sync failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        None => SyncArgs::default().execute(&load_config(&cli)?).await?,
        Some(Commands::Sync(args)) => args.execute(&load_config(&cli)?).await?,
        Some(Commands::Config) => {
            let config = load_config(&cli)?;
            println!("GitVault Configuration");
            println!("======================");
            println!();
            println!("  secrets_file: {}", config.secrets_file.display());
            println!("  backup_dir: {}", config.backup_dir.display());
            println!("  github.api_url: {}", config.github.api_url);
            println!("  github.timeout: {:?}", config.github.timeout);
            println!();
            match cli.config.clone().or_else(Config::default_config_path) {
                Some(path) if path.exists() => {
                    println!("Config file: {}", path.display());
                    println!("  (exists)");
                }
                Some(path) => {
                    println!("Config file: {}", path.display());
                    println!("  (not found - using defaults)");
                }
                None => println!("Config file: (no config directory)"),
            }
        }
        Some(Commands::Version) => {
            println!("gitvault {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Load configuration with overrides
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = Config::load_with_overrides(
        cli.config.as_deref(),
        cli.secrets_file.clone(),
        cli.backup_dir.clone(),
        cli.api_url.clone(),
    )?;

    tracing::debug!(
        secrets_file = %config.secrets_file.display(),
        backup_dir = %config.backup_dir.display(),
        api_url = %config.github.api_url,
        "Configuration loaded"
    );

    Ok(config)
}
