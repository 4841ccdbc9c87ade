//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the harvester:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for listing and article pages
//! - Error classification (timeout, transport, HTTP status)

use crate::config::UserAgentConfig;
use crate::{HarvestError, Result};
use reqwest::Client;
use std::time::Duration;

/// Formats the user agent header value
///
/// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    match &config.contact_url {
        Some(contact_url) => format!(
            "{}/{} (+{})",
            config.crawler_name, config.crawler_version, contact_url
        ),
        None => format!("{}/{}", config.crawler_name, config.crawler_version),
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use berita_harvester::config::UserAgentConfig;
/// use berita_harvester::harvest::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body
///
/// # Error Classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | Request timed out | `HarvestError::Timeout` |
/// | Non-2xx status | `HarvestError::Status` |
/// | Transport or body failure | `HarvestError::Http` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn classify_error(url: &str, error: reqwest::Error) -> HarvestError {
    if error.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else {
        HarvestError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
