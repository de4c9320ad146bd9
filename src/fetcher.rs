//! HTTP fetcher for downloading raw blocklist sources.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::utils::format_count;

/// Maximum size per source download (10 MB). The largest known feed
/// (PhishTank CSV) is ~5 MB.
const MAX_SOURCE_SIZE: usize = 10 * 1024 * 1024;

/// Outcome of a single source fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Success,
    Error,
}

/// Raw lines fetched from one source, with the fetch outcome.
///
/// A failed fetch is still a result: zero lines and [`FetchStatus::Error`].
/// One bad source never aborts the others.
#[derive(Debug)]
pub struct FetchResult {
    pub name: String,
    pub url: String,
    pub status: FetchStatus,
    pub lines: Vec<String>,
    pub raw_count: usize,
    pub fetched_at: DateTime<Utc>,
}

/// HTTP client for fetching sources
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a new fetcher with the given per-request timeout
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(format!("oustdom/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch one source. Failures are logged and encoded in the result
    /// status, never returned as errors.
    pub async fn fetch_source(&self, name: &str, url: &str) -> FetchResult {
        info!("Fetching {}...", name);
        let fetched_at = Utc::now();

        match self.fetch(url).await {
            Ok(content) => {
                let lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
                let raw_count = lines.len();
                info!("{}: fetched {} raw entries", name, format_count(raw_count));
                FetchResult {
                    name: name.to_string(),
                    url: url.to_string(),
                    status: FetchStatus::Success,
                    lines,
                    raw_count,
                    fetched_at,
                }
            }
            Err(e) => {
                warn!("Failed to fetch {}: {:#}", name, e);
                FetchResult {
                    name: name.to_string(),
                    url: url.to_string(),
                    status: FetchStatus::Error,
                    lines: Vec::new(),
                    raw_count: 0,
                    fetched_at,
                }
            }
        }
    }

    /// Fetch all sources of a category, one at a time in configured order.
    pub async fn fetch_sources(&self, sources: &[&SourceConfig]) -> Vec<FetchResult> {
        let mut results = Vec::with_capacity(sources.len());
        for source in sources {
            results.push(self.fetch_source(&source.name, &source.url).await);
        }
        results
    }

    /// Fetch content with size validation
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {}", response.status());
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > MAX_SOURCE_SIZE {
                anyhow::bail!(
                    "Response too large: {} bytes (max: {} bytes)",
                    content_length,
                    MAX_SOURCE_SIZE
                );
            }
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        // Content-Length is not always present; check the actual size too
        if body.len() > MAX_SOURCE_SIZE {
            anyhow::bail!(
                "Downloaded content too large: {} bytes (max: {} bytes)",
                body.len(),
                MAX_SOURCE_SIZE
            );
        }

        Ok(body)
    }
}

// Note: Default is intentionally not implemented for Fetcher
// because new() can fail and we want explicit error handling.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_new() {
        assert!(Fetcher::new(15).is_ok());
    }

    #[test]
    fn test_fetch_status_serialization() {
        assert_eq!(serde_json::to_string(&FetchStatus::Success).unwrap(), "\"success\"");
        assert_eq!(serde_json::to_string(&FetchStatus::Error).unwrap(), "\"error\"");
    }

    #[tokio::test]
    async fn test_fetch_source_unreachable_records_error() {
        let fetcher = Fetcher::new(1).unwrap();
        // Reserved TEST-NET-1 address: connection fails fast, nothing listens
        let result = fetcher
            .fetch_source("unreachable", "https://192.0.2.1/list.txt")
            .await;

        assert_eq!(result.status, FetchStatus::Error);
        assert!(result.lines.is_empty());
        assert_eq!(result.raw_count, 0);
        assert_eq!(result.name, "unreachable");
    }

    #[tokio::test]
    async fn test_fetch_sources_partial_failure_keeps_going() {
        let fetcher = Fetcher::new(1).unwrap();
        let sources = vec![
            SourceConfig {
                name: "first".to_string(),
                url: "https://192.0.2.1/a.txt".to_string(),
                enabled: true,
            },
            SourceConfig {
                name: "second".to_string(),
                url: "https://192.0.2.2/b.txt".to_string(),
                enabled: true,
            },
        ];
        let refs: Vec<&SourceConfig> = sources.iter().collect();

        let results = fetcher.fetch_sources(&refs).await;

        // Both sources produce a result even though both fail
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "first");
        assert_eq!(results[1].name, "second");
    }
}
