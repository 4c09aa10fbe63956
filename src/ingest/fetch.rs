// src/ingest/fetch.rs
use std::collections::HashMap;
use std::time::Duration;

use crate::error::FetchError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; AwardsWatch/1.0; +cron)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Retrieves the body of a URL as text.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with a fixed User-Agent and per-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Self::with_user_agent(timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(target: "ingest", %url, status = status.as_u16(), "non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}

/// Serves canned bodies keyed by URL. Unknown URLs fail with `NotFound`.
#[derive(Debug, Default, Clone)]
pub struct FixtureFetcher {
    bodies: HashMap<String, String>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&mut self, url: &str, body: &str) {
        self.bodies.insert(url.to_string(), body.to_string());
    }
}

#[async_trait::async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}
