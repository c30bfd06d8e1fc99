//! `[source]` section configuration.
//!
//! Where relative kolam sources are fetched from.
//!
//! # Example
//!
//! ```toml
//! [source]
//! base_url = "https://api.example.com/kolams"   # Prefix for relative sources
//! timeout = 30                                  # Seconds, 0 = wait forever
//! ```
//!
//! `KOLAM_API_URL` and `--base-url` override `base_url`.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL that relative sources are joined onto.
    pub base_url: Option<String>,

    /// Request timeout in seconds. `0` disables the timeout.
    pub timeout: u64,
}

impl SourceConfig {
    pub const BASE_URL: FieldPath = FieldPath::new("source.base_url");

    /// The request timeout, if one is set.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    /// Parsed base URL. `None` when unset or invalid (invalid values are
    /// reported by [`SourceConfig::validate`]).
    pub fn base_url(&self) -> Option<Url> {
        self.base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| Url::parse(s.trim()).ok())
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let Some(raw) = self.base_url.as_deref() else {
            return;
        };
        if raw.trim().is_empty() {
            diag.warn(Self::BASE_URL, "empty, relative sources cannot be resolved");
            return;
        }

        match Url::parse(raw.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https" | "file") => {}
            Ok(url) => diag.error_with_hint(
                Self::BASE_URL,
                format!("unsupported scheme `{}`", url.scheme()),
                "use an `http`, `https` or `file` URL",
            ),
            Err(e) => diag.error_with_hint(
                Self::BASE_URL,
                format!("`{raw}` is not a valid URL: {e}"),
                "use an absolute URL such as `https://example.com/kolams`",
            ),
        }
    }
}
