//! Text fetching behind the [`Fetch`] trait.

use std::future::Future;
use std::time::Duration;
use url::Url;

use super::FetchError;

/// Fetches the body of a URL as text.
pub trait Fetch: Send + Sync + 'static {
    fn fetch_text(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `http(s)://` via reqwest, `file://` from disk.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher. `timeout` bounds each whole request; `None` waits
    /// for as long as the server takes.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("kolam/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send {
        let client = self.client.clone();
        let url = url.clone();

        async move {
            let scheme = url.scheme().to_owned();
            match scheme.as_str() {
                "http" | "https" => fetch_http(&client, url).await,
                "file" => fetch_file(url).await,
                other => Err(FetchError::Scheme(other.to_string())),
            }
        }
    }
}

async fn fetch_http(client: &reqwest::Client, url: Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::Http {
            url: url.clone(),
            error: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url,
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Http {
        url,
        error: e.to_string(),
    })
}

async fn fetch_file(url: Url) -> Result<String, FetchError> {
    let path = url.to_file_path().map_err(|()| FetchError::Resolve {
        src: url.to_string(),
        reason: "not a local file path".into(),
    })?;
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| FetchError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("k.svg");
        std::fs::write(&path, "<svg/>").unwrap();

        let fetcher = HttpFetcher::new(None).unwrap();
        let url = Url::from_file_path(&path).unwrap();
        assert_eq!(fetcher.fetch_text(&url).await.unwrap(), "<svg/>");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.svg")).unwrap();

        let fetcher = HttpFetcher::new(None).unwrap();
        let err = fetcher.fetch_text(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let fetcher = HttpFetcher::new(Some(Duration::from_secs(1))).unwrap();
        let url = Url::parse("ftp://example.com/k.svg").unwrap();
        let err = fetcher.fetch_text(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Scheme(s) if s == "ftp"));
    }
}
