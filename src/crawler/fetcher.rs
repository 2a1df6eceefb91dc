//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler: building the shared
//! HTTP client with the configured user agent string and timeouts, fetching
//! page bodies, and classifying failures so the traversal engine can decide
//! what is fatal (the seed) and what merely prunes a branch (everything else).

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of fetching a single page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched an HTML page
    Html {
        /// Final URL after redirects; children are resolved against this
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Decoded page body
        body: String,
    },

    /// Fetched successfully but the response is not HTML; nothing to extract
    NotHtml {
        /// The Content-Type header received
        content_type: String,
    },

    /// Server answered with a non-success status
    HttpStatus {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network-level failure (DNS, connect, timeout, TLS, body read)
    Network {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Short human-readable reason, used when a seed fetch failure is surfaced
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Html { .. } | Self::NotHtml { .. } => None,
            Self::HttpStatus { status_code } => Some(format!("HTTP {}", status_code)),
            Self::Network { error } => Some(error.clone()),
        }
    }
}

/// Builds the HTTP client shared by every fetch of a crawler instance
///
/// The user agent string is `crawler-name/crawler-version` from the
/// configuration. Redirects are followed by reqwest's default policy; the
/// traversal resolves child links against the post-redirect URL.
pub fn build_http_client(
    config: &UserAgentConfig,
    fetch_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(fetch_timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Errors are deliberately opaque strings: the caller only distinguishes
/// "page body to extract" from "branch to prune", plus the seed special case.
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            return FetchOutcome::Network { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpStatus {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Treat a missing Content-Type as HTML; small servers often omit it
    if !content_type.is_empty() && !content_type.contains("text/html") {
        return FetchOutcome::NotHtml { content_type };
    }

    let final_url = response.url().clone();

    match response.text().await {
        Ok(body) => FetchOutcome::Html {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchOutcome::Network {
            error: e.to_string(),
        },
    }
}
