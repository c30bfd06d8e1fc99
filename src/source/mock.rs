//! Scripted [`Fetch`] for tests.
//!
//! Serves canned bodies by URL, optionally after a delay, and records every
//! request so tests can assert how often the network would have been hit.
//! Unknown URLs answer 404.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::{Fetch, FetchError};

#[derive(Debug, Clone)]
struct Scripted {
    body: String,
    delay: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    responses: Arc<HashMap<String, Scripted>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body` immediately.
    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.with_delayed_body(url, body, Duration::ZERO)
    }

    /// Answer `url` with `body` after `delay`.
    pub fn with_delayed_body(mut self, url: &str, body: &str, delay: Duration) -> Self {
        Arc::make_mut(&mut self.responses).insert(
            url.to_string(),
            Scripted {
                body: body.to_string(),
                delay,
            },
        );
        self
    }

    /// Total number of requests made.
    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    /// Number of requests made for `url`.
    pub fn calls_for(&self, url: &str) -> usize {
        self.requests.lock().iter().filter(|u| *u == url).count()
    }
}

impl Fetch for MockFetcher {
    fn fetch_text(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send {
        self.requests.lock().push(url.to_string());
        let scripted = self.responses.get(url.as_str()).cloned();
        let url = url.clone();

        async move {
            let Some(Scripted { body, delay }) = scripted else {
                return Err(FetchError::Status { url, status: 404 });
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok(body)
        }
    }
}
