//! Exec command - run a command with artifacts on a PATH-style variable

use crate::cli::args::ExecArgs;
use crate::config::Config;
use crate::context::{EnvPathVar, ProcessEnvironment};
use crate::error::{DepinjectError, DepinjectResult};
use std::process::ExitCode;
use tokio::process::Command;
use tracing::debug;

/// Execute the exec command, returning the child's exit status
pub async fn execute(args: ExecArgs, config: &Config) -> DepinjectResult<ExitCode> {
    let coordinates = super::coordinates(&args.artifacts, config)?;
    let var = args.var.unwrap_or_else(|| config.inject.path_var.clone());
    let pipeline = super::pipeline(config, EnvPathVar::new(var.clone()))?;

    super::blocking(move || {
        pipeline.inject_all(&coordinates, &ProcessEnvironment)?;
        Ok(())
    })
    .await?;

    let (program, rest) = args
        .command
        .split_first()
        .ok_or_else(|| DepinjectError::Internal("no command given".to_string()))?;
    debug!("Running {} with {} = {:?}", program, var, std::env::var_os(&var));

    let status = Command::new(program)
        .args(rest)
        .status()
        .await
        .map_err(|e| DepinjectError::command_failed(program.clone(), e))?;

    Ok(match status.code() {
        Some(0) => ExitCode::SUCCESS,
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        // Terminated by a signal
        None => ExitCode::FAILURE,
    })
}
