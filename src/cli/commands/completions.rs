//! Completions command - print shell completion scripts

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::DepinjectResult;
use clap::CommandFactory;
use std::io;

/// Execute the completions command
pub async fn execute(args: CompletionsArgs) -> DepinjectResult<()> {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "depinject", &mut io::stdout());
    Ok(())
}
