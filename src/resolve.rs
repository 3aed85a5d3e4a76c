//! Download URL resolution
//!
//! `base/` + group with `.` replaced by `/` + `/artifact/version/artifact-version.jar`.
//! Pure and deterministic: no environment or network access.

use crate::coordinate::Coordinate;
use crate::error::{DepinjectError, DepinjectResult};
use url::Url;

/// Base URL with exactly one trailing `/`
pub fn normalize_base(base: &str) -> String {
    format!("{}/", base.trim_end_matches('/'))
}

/// Resolve the download URL of a coordinate's archive
pub fn resolve(coordinate: &Coordinate) -> DepinjectResult<Url> {
    let raw = coordinate.repository().base_url();
    let base = normalize_base(raw);

    let mut url = Url::parse(&base)
        .map_err(|e| DepinjectError::invalid_repository(raw, e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DepinjectError::invalid_repository(
            raw,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    url.path_segments_mut()
        .map_err(|_| DepinjectError::invalid_repository(raw, "not a base URL"))?
        .pop_if_empty()
        .extend(coordinate.group_segments())
        .push(coordinate.artifact())
        .push(coordinate.version())
        .push(&coordinate.file_name());

    Ok(url)
}
