//! Where kolam SVG text comes from.
//!
//! ```text
//! src ──► resolve(base) ──► Url ──► Fetch::fetch_text ──► normalize_svg
//! ```
//!
//! A source is either an absolute URL or a path relative to the configured
//! base URL (`KOLAM_API_URL`, `[source] base_url` or `--base-url`).

mod fetch;
#[cfg(test)]
pub mod mock;

pub use fetch::{Fetch, HttpFetcher};

use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::debug;
use crate::svg::{AnimateOptions, SvgError, normalize_svg};

/// The text could not be obtained.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot resolve `{src}`: {reason}")]
    Resolve { src: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {error}")]
    Http { url: Url, error: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: Url, status: u16 },

    #[error("cannot read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported URL scheme `{0}`")]
    Scheme(String),
}

/// Why a load produced nothing to show.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Transfer(#[from] FetchError),

    #[error("malformed SVG: {0}")]
    Parse(#[from] SvgError),
}

/// Resolve `src` against `base`.
///
/// An absolute URL is used as is. Anything else is joined onto `base`,
/// treating the base as a directory: `("a.svg", "https://h/api")` resolves to
/// `https://h/api/a.svg`, and a leading `/` on `src` does not escape the base.
pub fn resolve(src: &str, base: Option<&Url>) -> Result<Url, FetchError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(FetchError::Resolve {
            src: src.to_string(),
            reason: "empty source".into(),
        });
    }

    match Url::parse(src) {
        Ok(url) => return Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {}
        Err(e) => {
            return Err(FetchError::Resolve {
                src: src.to_string(),
                reason: e.to_string(),
            });
        }
    }

    let Some(base) = base else {
        return Err(FetchError::Resolve {
            src: src.to_string(),
            reason: "relative source and no base URL configured".into(),
        });
    };

    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }

    dir.join(src.trim_start_matches('/'))
        .map_err(|e| FetchError::Resolve {
            src: src.to_string(),
            reason: e.to_string(),
        })
}

/// Resolve, fetch and normalize one source.
///
/// `Ok(None)` means the text was fetched but holds no `svg` element.
pub async fn load<F: Fetch>(
    fetcher: &F,
    src: &str,
    base: Option<&Url>,
    options: &AnimateOptions,
) -> Result<Option<String>, LoadError> {
    let url = resolve(src, base)?;
    debug!("fetch"; "GET {}", url);

    let text = fetcher.fetch_text(&url).await?;
    debug!("fetch"; "{} bytes from {}", text.len(), url);

    Ok(normalize_svg(&text, options)?)
}
