//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// depinject - fetch, cache and inject Maven artifacts
///
/// Downloads artifact archives into a local cache and makes them visible
/// to a running process without restarting it.
#[derive(Parser, Debug)]
#[command(name = "depinject")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DEPINJECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache root (overrides cache.root from the config file)
    #[arg(long, global = true, env = "DEPINJECT_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show download URL and cache state without downloading
    Resolve(ResolveArgs),

    /// Download artifacts into the cache
    Fetch(ArtifactArgs),

    /// Fetch artifacts and print them as a search path
    Classpath(ArtifactArgs),

    /// Fetch artifacts, add them to an environment variable and run a command
    Exec(ExecArgs),

    /// List known repositories
    Repos,

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Artifact selection shared by most commands
#[derive(Parser, Debug)]
pub struct ArtifactArgs {
    /// Artifacts as group:artifact:version
    #[arg(required = true, value_name = "COORDINATE")]
    pub coordinates: Vec<String>,

    /// Repository name (see `depinject repos`) or base URL
    #[arg(short, long)]
    pub repository: Option<String>,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the exec command
#[derive(Parser, Debug)]
pub struct ExecArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// PATH-style variable to extend (default: inject.path_var, CLASSPATH)
    #[arg(long)]
    pub var: Option<String>,

    /// Command to run (after --)
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

/// Output format for resolve
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
    /// Plain text, one path per line
    Plain,
}
