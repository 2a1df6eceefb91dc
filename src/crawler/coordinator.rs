//! Crawl coordinator - traversal orchestration
//!
//! This module owns the crawl loop: claiming URLs from an explicit frontier,
//! fetching them on a bounded worker pool, running extraction, merging page
//! results into the crawl-scoped record, and enqueueing resolved child links
//! until the depth bound, the deadline, or an empty frontier stops it.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::extractor::extract_contacts;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::result::CrawlResult;
use crate::crawler::visited::{PageState, VisitSet};
use crate::url::resolve_link;
use crate::LeadsiftError;
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant as TokioInstant};
use url::Url;

/// Mutable state scoped to exactly one crawl invocation
///
/// Allocated inside `crawl` and never stored anywhere process-wide, so
/// concurrent crawl invocations cannot interleave writes. Mutation is
/// serialized through the two locks; the visited check-and-mark happens
/// under its lock before any fetch is spawned.
struct CrawlContext {
    result: Mutex<CrawlResult>,
    visited: Mutex<VisitSet>,
}

impl CrawlContext {
    fn new(seed_url: &str) -> Self {
        Self {
            result: Mutex::new(CrawlResult::new(seed_url)),
            visited: Mutex::new(VisitSet::new()),
        }
    }
}

/// The crawl engine
///
/// Holds only immutable, crawl-independent state (HTTP client and config),
/// so one instance safely serves concurrent crawl invocations.
pub struct Crawler {
    client: Client,
    config: CrawlerConfig,
}

impl Crawler {
    /// Creates a crawler with a shared HTTP client built from the config
    pub fn new(
        config: CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, LeadsiftError> {
        let client = build_http_client(user_agent, config.fetch_timeout())?;
        Ok(Self { client, config })
    }

    /// Crawls from `seed` up to `max_depth` link-hops and returns the
    /// aggregated contact record
    ///
    /// The seed itself is depth 0; `max_depth = 0` fetches only the seed
    /// page. Pages discovered at `depth == max_depth` are fetched and
    /// extracted but their links are not expanded.
    ///
    /// Only the seed fetch is fatal. Child fetch failures and unresolvable
    /// links prune their branch silently, and hitting the crawl deadline
    /// returns whatever has been aggregated so far.
    pub async fn crawl(&self, seed: &str, max_depth: u32) -> Result<CrawlResult, LeadsiftError> {
        if max_depth > self.config.max_depth_limit {
            return Err(LeadsiftError::DepthLimit {
                requested: max_depth,
                limit: self.config.max_depth_limit,
            });
        }

        let seed_url = Url::parse(seed).map_err(|e| LeadsiftError::InvalidSeed {
            url: seed.to_string(),
            reason: e.to_string(),
        })?;
        if seed_url.scheme() != "http" && seed_url.scheme() != "https" {
            return Err(LeadsiftError::InvalidSeed {
                url: seed.to_string(),
                reason: format!("unsupported scheme '{}'", seed_url.scheme()),
            });
        }

        let started = Instant::now();
        let deadline = TokioInstant::now() + self.config.crawl_deadline();
        let ctx = CrawlContext::new(seed_url.as_str());
        let mut frontier: VecDeque<(Url, u32)> = VecDeque::new();

        tracing::info!("Starting crawl of {} with max depth {}", seed_url, max_depth);

        // The seed is fetched first, outside the pool: its failure is the
        // only one surfaced to the caller.
        ctx.visited.lock().unwrap().visit(seed_url.as_str());
        let outcome = fetch_page(&self.client, seed_url.as_str()).await;
        if let Some(reason) = outcome.failure_reason() {
            ctx.visited
                .lock()
                .unwrap()
                .complete(seed_url.as_str(), PageState::FetchFailed);
            return Err(LeadsiftError::SeedFetch {
                url: seed_url.to_string(),
                reason,
            });
        }
        self.handle_fetched(&ctx, &seed_url, 0, max_depth, outcome, &mut frontier);

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_fetches as usize));
        let mut tasks: JoinSet<(Url, u32, FetchOutcome)> = JoinSet::new();
        let mut pages_fetched: u64 = 1;

        loop {
            if TokioInstant::now() >= deadline {
                if !frontier.is_empty() || !tasks.is_empty() {
                    tracing::warn!(
                        "Crawl deadline reached; abandoning {} queued and {} in-flight pages",
                        frontier.len(),
                        tasks.len()
                    );
                }
                tasks.abort_all();
                break;
            }

            // Fill the pool from the frontier without blocking
            while !frontier.is_empty() {
                let permit = match semaphore.clone().try_acquire_owned() {
                    Ok(permit) => permit,
                    Err(_) => break,
                };
                let (url, depth) = match frontier.pop_front() {
                    Some(next) => next,
                    None => break,
                };
                // Atomic check-and-mark: after this, no other worker in this
                // crawl can claim the same URL.
                if !ctx.visited.lock().unwrap().visit(url.as_str()) {
                    continue;
                }
                let client = self.client.clone();
                tasks.spawn(async move {
                    let _permit = permit;
                    let outcome = fetch_page(&client, url.as_str()).await;
                    (url, depth, outcome)
                });
            }

            if tasks.is_empty() {
                // Frontier drained and nothing in flight
                break;
            }

            match timeout_at(deadline, tasks.join_next()).await {
                Err(_) => continue, // deadline handled at the top of the loop
                Ok(None) => continue,
                Ok(Some(Err(e))) => {
                    if !e.is_cancelled() {
                        tracing::warn!("Crawl worker failed: {}", e);
                    }
                }
                Ok(Some(Ok((url, depth, outcome)))) => {
                    pages_fetched += 1;
                    self.handle_fetched(&ctx, &url, depth, max_depth, outcome, &mut frontier);

                    if pages_fetched % 10 == 0 {
                        tracing::info!(
                            "Progress: {} pages fetched, {} in frontier",
                            pages_fetched,
                            frontier.len()
                        );
                    }
                }
            }
        }

        drop(tasks);

        let result = ctx.result.into_inner().unwrap();
        tracing::info!(
            "Crawl of {} finished: {} pages fetched, {} contacts in {:?}",
            result.seed_url,
            pages_fetched,
            result.contact_count(),
            started.elapsed()
        );

        Ok(result)
    }

    /// Processes one completed fetch: extract, merge, enqueue children
    fn handle_fetched(
        &self,
        ctx: &CrawlContext,
        url: &Url,
        depth: u32,
        max_depth: u32,
        outcome: FetchOutcome,
        frontier: &mut VecDeque<(Url, u32)>,
    ) {
        match outcome {
            FetchOutcome::Html {
                final_url, body, ..
            } => {
                let page = extract_contacts(&body);
                ctx.result.lock().unwrap().merge(&page);
                ctx.visited
                    .lock()
                    .unwrap()
                    .complete(url.as_str(), PageState::Extracted);
                tracing::debug!(
                    "Extracted {} at depth {}: {} links on page",
                    url,
                    depth,
                    page.links.len()
                );

                // Strict less-than: pages at max_depth are extracted but not
                // expanded further.
                if depth < max_depth {
                    for href in &page.links {
                        if let Some(child) = resolve_link(&final_url, href) {
                            frontier.push_back((child, depth + 1));
                        }
                    }
                }
            }
            FetchOutcome::NotHtml { content_type } => {
                // A fetched non-HTML document simply contributes nothing
                ctx.visited
                    .lock()
                    .unwrap()
                    .complete(url.as_str(), PageState::Extracted);
                tracing::debug!("No markup to extract from {} ({})", url, content_type);
            }
            FetchOutcome::HttpStatus { status_code } => {
                ctx.visited
                    .lock()
                    .unwrap()
                    .complete(url.as_str(), PageState::FetchFailed);
                tracing::debug!("Pruning {} at depth {}: HTTP {}", url, depth, status_code);
            }
            FetchOutcome::Network { error } => {
                ctx.visited
                    .lock()
                    .unwrap()
                    .complete(url.as_str(), PageState::FetchFailed);
                tracing::debug!("Pruning {} at depth {}: {}", url, depth, error);
            }
        }
    }
}
