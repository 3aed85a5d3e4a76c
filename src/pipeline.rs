//! Fetch-cache-inject orchestration
//!
//! One call walks a single coordinate through
//! resolve → cache check → fetch on miss → inject. Calls share nothing but
//! the cache directory and the per-path fetch locks, so a [`Pipeline`] can
//! be used from many threads at once.

use crate::cache::{ArtifactCache, CoordinateLocks, FileLock, DEFAULT_CACHE_ROOT};
use crate::coordinate::Coordinate;
use crate::error::{DepinjectError, DepinjectResult};
use crate::fetch::{Fetch, FetchOutcome, HttpFetcher};
use crate::inject::{ExtendSearchPath, Injector};
use crate::resolve::resolve;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// A coordinate whose archive is present in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached {
    pub coordinate: Coordinate,
    /// Where the archive is (or would be) downloaded from
    pub url: Url,
    /// Archive location in the cache
    pub path: PathBuf,
    /// Set when this call performed the download
    pub fetched: Option<FetchOutcome>,
}

impl Cached {
    pub fn was_cache_hit(&self) -> bool {
        self.fetched.is_none()
    }
}

/// Resolves, caches and injects artifacts
#[derive(Debug)]
pub struct Pipeline<C, F = HttpFetcher> {
    cache: ArtifactCache,
    fetcher: F,
    injector: Injector<C>,
    locks: CoordinateLocks,
}

impl<C> Pipeline<C, HttpFetcher> {
    /// Builder using `capability` for injection
    pub fn builder(capability: C) -> PipelineBuilder<C, HttpFetcher> {
        PipelineBuilder {
            cache_root: PathBuf::from(DEFAULT_CACHE_ROOT),
            fetcher: HttpFetcher::default(),
            capability,
        }
    }
}

impl<C, F: Fetch> Pipeline<C, F> {
    pub fn new(cache: ArtifactCache, fetcher: F, capability: C) -> Self {
        Self {
            cache,
            fetcher,
            injector: Injector::new(capability),
            locks: CoordinateLocks::new(),
        }
    }

    pub fn cache(&self) -> &ArtifactCache {
        &self.cache
    }

    pub fn injector(&self) -> &Injector<C> {
        &self.injector
    }

    /// Make sure the archive of `coordinate` is cached, downloading on a miss
    pub fn ensure(&self, coordinate: &Coordinate) -> DepinjectResult<Cached> {
        let url = resolve(coordinate)?;
        let path = self.cache.path_for(coordinate);
        debug!("Resolved {} to {}", coordinate, url);

        let fetched = if self.cache.exists(&path) {
            info!("Cache hit for {}", coordinate);
            None
        } else {
            debug!("Cache miss for {}", coordinate);
            self.fetch_exclusive(coordinate, &url, &path)?
        };

        if !self.cache.exists(&path) {
            return Err(DepinjectError::download(
                coordinate.name(),
                format!("{} is missing after download", path.display()),
            ));
        }

        Ok(Cached {
            coordinate: coordinate.clone(),
            url,
            path,
            fetched,
        })
    }

    /// Cache `coordinate` if needed and inject it into `target`
    pub fn inject<T: ?Sized>(&self, coordinate: &Coordinate, target: &T) -> DepinjectResult<Cached>
    where
        C: ExtendSearchPath<T>,
    {
        let cached = self.ensure(coordinate)?;
        self.injector.inject(&cached.path, target)?;
        info!("Injected {}", coordinate);
        Ok(cached)
    }

    /// [`inject`](Self::inject) from `group:artifact:version` shorthand
    pub fn inject_shorthand<T: ?Sized>(&self, shorthand: &str, target: &T) -> DepinjectResult<Cached>
    where
        C: ExtendSearchPath<T>,
    {
        self.inject(&Coordinate::parse(shorthand)?, target)
    }

    /// Inject every coordinate in order, stopping at the first failure
    ///
    /// Coordinates after a failing one are neither fetched nor injected;
    /// those before it stay injected.
    pub fn inject_all<'a, T: ?Sized>(
        &self,
        coordinates: impl IntoIterator<Item = &'a Coordinate>,
        target: &T,
    ) -> DepinjectResult<Vec<Cached>>
    where
        C: ExtendSearchPath<T>,
    {
        coordinates
            .into_iter()
            .map(|coordinate| self.inject(coordinate, target))
            .collect()
    }

    /// Download under the in-process and cross-process locks for `path`
    ///
    /// Returns `None` when another caller finished the download while this
    /// one was waiting.
    fn fetch_exclusive(
        &self,
        coordinate: &Coordinate,
        url: &Url,
        path: &Path,
    ) -> DepinjectResult<Option<FetchOutcome>> {
        let slot = self.locks.slot(path);
        let result = {
            let _guard = slot.lock();
            let lock_path = self.cache.lock_path_for(coordinate);
            FileLock::acquire(&lock_path)
                .map_err(|e| {
                    DepinjectError::download_caused(
                        coordinate.name(),
                        format!("could not lock {}", lock_path.display()),
                        e,
                    )
                })
                .and_then(|_file_lock| {
                    if self.cache.exists(path) {
                        debug!("{} was downloaded by another caller", coordinate);
                        Ok(None)
                    } else {
                        info!("Downloading {} from {}", coordinate, url);
                        self.fetcher
                            .fetch(url, path)
                            .map(Some)
                            .map_err(|e| as_download_failure(coordinate, e))
                    }
                })
        };
        drop(slot);
        self.locks.prune();
        result
    }
}

/// Keep pipeline errors within the four core kinds
fn as_download_failure(coordinate: &Coordinate, err: DepinjectError) -> DepinjectError {
    match err {
        e @ DepinjectError::DependencyDownload { .. } => e,
        other => DepinjectError::download_caused(coordinate.name(), "fetch failed", other),
    }
}

/// Builder for [`Pipeline`]
#[derive(Debug)]
pub struct PipelineBuilder<C, F> {
    cache_root: PathBuf,
    fetcher: F,
    capability: C,
}

impl<C, F: Fetch> PipelineBuilder<C, F> {
    /// Cache root, `.dependencies` by default
    pub fn cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cache_root = root.into();
        self
    }

    /// Replace the HTTP fetcher
    pub fn fetcher<G: Fetch>(self, fetcher: G) -> PipelineBuilder<C, G> {
        PipelineBuilder {
            cache_root: self.cache_root,
            fetcher,
            capability: self.capability,
        }
    }

    pub fn build(self) -> DepinjectResult<Pipeline<C, F>> {
        let cache = ArtifactCache::open(self.cache_root)?;
        Ok(Pipeline::new(cache, self.fetcher, self.capability))
    }
}
