//! Classpath command - fetch artifacts and print them as a search path

use crate::cli::args::ArtifactArgs;
use crate::config::Config;
use crate::context::{AppendToSearchPath, SearchPath};
use crate::error::{DepinjectError, DepinjectResult};

/// Execute the classpath command
///
/// Prints only the joined path list so the output can be captured
/// directly, e.g. `java -cp "$(depinject classpath ...)"`.
pub async fn execute(args: ArtifactArgs, config: &Config) -> DepinjectResult<()> {
    let coordinates = super::coordinates(&args, config)?;
    let pipeline = super::pipeline(config, AppendToSearchPath)?;

    let search_path = super::blocking(move || {
        let target = SearchPath::new();
        pipeline.inject_all(&coordinates, &target)?;
        Ok(target)
    })
    .await?;

    let joined = search_path
        .to_os_string()
        .map_err(|e| DepinjectError::Internal(format!("joining search path: {}", e)))?;
    println!("{}", joined.to_string_lossy());

    Ok(())
}
