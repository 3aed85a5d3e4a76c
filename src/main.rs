//! depinject - artifact fetch, cache and inject
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use depinject::cli::{Cli, Commands};
use depinject::config::ConfigManager;
use depinject::error::DepinjectResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {} {}", style("caused by:").dim(), cause);
                source = cause.source();
            }
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> DepinjectResult<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let mut config = config_manager.load().await?;

    init_logging(cli.verbose, &config.general.log_format);
    debug!("Using config {}", config_manager.path().display());

    if let Some(dir) = cli.cache_dir {
        debug!("Cache root overridden: {}", dir.display());
        config.cache.root = dir;
    }

    // Dispatch to command
    match cli.command {
        Commands::Resolve(args) => depinject::cli::commands::resolve(args, &config).await?,
        Commands::Fetch(args) => depinject::cli::commands::fetch(args, &config).await?,
        Commands::Classpath(args) => depinject::cli::commands::classpath(args, &config).await?,
        Commands::Exec(args) => return depinject::cli::commands::exec(args, &config).await,
        Commands::Repos => depinject::cli::commands::repos(&config).await?,
        Commands::Config(args) => {
            depinject::cli::commands::config(args, &config, &config_manager).await?
        }
        Commands::Completions(args) => depinject::cli::commands::completions(args).await?,
    }

    Ok(ExitCode::SUCCESS)
}

/// 0 = warn, 1 = info, 2+ = debug; RUST_LOG wins when set
fn init_logging(verbose: u8, format: &str) {
    let default = match verbose {
        0 => "depinject=warn",
        1 => "depinject=info",
        _ => "depinject=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
