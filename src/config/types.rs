use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for leadsift
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub server: ServerConfig,
    pub export: ExportConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Hard cap on the crawl depth a caller may request
    #[serde(rename = "max-depth-limit")]
    pub max_depth_limit: u32,

    /// Maximum number of concurrent page fetches within one crawl
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Deadline for a whole crawl invocation (seconds)
    #[serde(rename = "crawl-deadline-secs")]
    pub crawl_deadline_secs: u64,
}

impl CrawlerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn crawl_deadline(&self) -> Duration {
        Duration::from_secs(self.crawl_deadline_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

/// HTTP service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP service binds to
    #[serde(rename = "bind-address")]
    pub bind_address: String,

    /// Port the HTTP service listens on
    pub port: u16,
}

/// Export store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory where exported delimited files are stored
    #[serde(rename = "uploads-dir")]
    pub uploads_dir: String,
}
