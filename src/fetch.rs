//! Artifact download
//!
//! Streams a remote archive into the cache. The body is written to a
//! temporary `.part` file next to the destination, synced, and renamed into
//! place, so the destination either does not exist or is complete.

use crate::error::{DepinjectError, DepinjectResult};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default `User-Agent` sent with every request
pub const USER_AGENT: &str = concat!("depinject/", env!("CARGO_PKG_VERSION"));

/// Summary of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Bytes written to the destination
    pub bytes: u64,
    /// SHA-256 of the body (hex), informational only
    pub sha256: String,
}

/// Transport that stores the resource at `url` in `destination`
///
/// Implementations must leave `destination` either absent or complete.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &Url, destination: &Path) -> DepinjectResult<FetchOutcome>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &Url, destination: &Path) -> DepinjectResult<FetchOutcome> {
        (**self).fetch(url, destination)
    }
}

/// Blocking HTTP(S) fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    progress: bool,
}

impl HttpFetcher {
    /// Create a fetcher with an optional global timeout per request
    ///
    /// Without a timeout a stalled transfer blocks indefinitely.
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .user_agent(user_agent)
            .build()
            .into();

        Self {
            agent,
            progress: false,
        }
    }

    /// Draw a progress bar on stderr while downloading
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    fn progress_bar(&self, len: Option<u64>, label: &str) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let bar = match len {
            Some(len) => {
                let bar = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
                if let Ok(style) = ProgressStyle::default_bar().template(
                    "  {spinner:.cyan} {prefix}  {bar:20.cyan/dim} {bytes}/{total_bytes} {elapsed:.dim}",
                ) {
                    bar.set_style(style.progress_chars("━╸─"));
                }
                bar
            }
            None => ProgressBar::new_spinner().with_style(ProgressStyle::default_spinner()),
        };
        bar.set_prefix(label.to_string());
        bar
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(None, USER_AGENT)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url, destination: &Path) -> DepinjectResult<FetchOutcome> {
        let name = display_name(destination);
        debug!("GET {}", url);

        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| DepinjectError::download_caused(&name, format!("request to {} failed", url), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DepinjectError::download(
                &name,
                format!("HTTP {} for URL: {}", status.as_u16(), url),
            ));
        }

        let body = response.into_body();
        let bar = self.progress_bar(body.content_length(), &name);
        let reader = bar.wrap_read(body.into_reader());

        let result = write_atomically(reader, destination)
            .map_err(|e| DepinjectError::download_caused(&name, "transfer failed", e));
        bar.finish_and_clear();

        let outcome = result?;
        debug!(
            "Wrote {} bytes to {} (sha256 {})",
            outcome.bytes,
            destination.display(),
            outcome.sha256
        );
        Ok(outcome)
    }
}

/// Copy `reader` into `destination` through a temporary sibling file
///
/// Creates missing parent directories. On error the temporary file is
/// removed and `destination` is left untouched.
pub fn write_atomically(reader: impl Read, destination: &Path) -> io::Result<FetchOutcome> {
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let temp = temp_path_for(destination);
    let result = copy_and_rename(reader, &temp, destination);

    if result.is_err() {
        if let Err(e) = fs::remove_file(&temp) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove partial download {}: {}", temp.display(), e);
            }
        }
    }
    result
}

fn copy_and_rename(mut reader: impl Read, temp: &Path, destination: &Path) -> io::Result<FetchOutcome> {
    let mut file = File::create(temp)?;
    let mut writer = HashingWriter::new(&mut file);
    let bytes = io::copy(&mut reader, &mut writer)?;
    let sha256 = writer.finish();

    file.sync_all()?;
    drop(file);
    fs::rename(temp, destination)?;

    Ok(FetchOutcome { bytes, sha256 })
}

/// `.lib-1.0.0.jar.<uuid>.part` beside the destination
fn temp_path_for(destination: &Path) -> PathBuf {
    let file_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    destination.with_file_name(format!(".{}.{}.part", file_name, uuid::Uuid::new_v4().simple()))
}

fn display_name(destination: &Path) -> String {
    destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| destination.display().to_string())
}

/// Writer that hashes everything passing through it
struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> HashingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
