//! CLI command implementations

pub mod classpath;
pub mod completions;
pub mod config;
pub mod exec;
pub mod fetch;
pub mod repos;
pub mod resolve;

pub use classpath::execute as classpath;
pub use completions::execute as completions;
pub use config::execute as config;
pub use exec::execute as exec;
pub use fetch::execute as fetch;
pub use repos::execute as repos;
pub use resolve::execute as resolve;

use crate::cli::args::ArtifactArgs;
use crate::config::Config;
use crate::coordinate::Coordinate;
use crate::error::{DepinjectError, DepinjectResult};
use crate::fetch::HttpFetcher;
use crate::pipeline::Pipeline;
use crate::repository::RepositoryCatalog;
use crate::ui::UiContext;

/// Parse the requested coordinates against the selected repository
pub(crate) fn coordinates(args: &ArtifactArgs, config: &Config) -> DepinjectResult<Vec<Coordinate>> {
    let catalog = RepositoryCatalog::with_custom(&config.repositories.custom)?;
    let name = args
        .repository
        .as_deref()
        .unwrap_or(&config.repositories.default);
    let repository = catalog.resolve_ref(name)?;

    args.coordinates
        .iter()
        .map(|s| Coordinate::parse_with_repository(s, repository.clone()))
        .collect()
}

/// Pipeline configured from the loaded configuration
pub(crate) fn pipeline<C>(config: &Config, capability: C) -> DepinjectResult<Pipeline<C>> {
    let ctx = UiContext::detect();
    let fetcher = HttpFetcher::new(config.fetch.timeout(), &config.fetch.user_agent)
        .with_progress(config.fetch.progress && ctx.use_progress());

    Pipeline::builder(capability)
        .cache_root(&config.cache.root)
        .fetcher(fetcher)
        .build()
}

/// Run blocking pipeline work off the async runtime
pub(crate) async fn blocking<T, F>(work: F) -> DepinjectResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> DepinjectResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| DepinjectError::Internal(format!("worker task failed: {}", e)))?
}
