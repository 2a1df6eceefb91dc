//! Per-crawl visited-URL tracking
//!
//! Each crawl invocation owns exactly one `VisitSet`; it is never shared
//! across crawls. A URL sitting in the frontier is implicitly pending — it
//! enters this set the moment it is claimed for fetching, which is what makes
//! the check-and-mark atomic under the context lock.

use std::collections::HashMap;
use std::fmt;

/// State of a URL that has been claimed for fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Claimed by a worker; fetch in flight
    Fetching,

    /// Fetched and run through the contact extractor
    Extracted,

    /// Fetch failed; branch pruned
    FetchFailed,
}

impl PageState {
    /// Returns true if this is a terminal state (never retried)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Fetching)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Extracted => "extracted",
            Self::FetchFailed => "fetch_failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Set of absolute URLs already claimed during one crawl run
///
/// Equality is exact string equality on the absolute URL; the resolver is the
/// only normalization applied.
#[derive(Debug, Default)]
pub struct VisitSet {
    pages: HashMap<String, PageState>,
}

impl VisitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL for fetching
    ///
    /// Returns `true` and records the URL as `Fetching` if it was not already
    /// present; returns `false` if any state is already recorded, in which
    /// case the caller must not fetch it again.
    pub fn visit(&mut self, url: &str) -> bool {
        if self.pages.contains_key(url) {
            return false;
        }
        self.pages.insert(url.to_string(), PageState::Fetching);
        true
    }

    /// Moves a claimed URL into a terminal state
    ///
    /// Only `Fetching → Extracted` and `Fetching → FetchFailed` are legal;
    /// anything else indicates a coordinator bug and is logged, not applied.
    pub fn complete(&mut self, url: &str, outcome: PageState) {
        if !outcome.is_terminal() {
            tracing::warn!("Refusing non-terminal completion {} for {}", outcome, url);
            return;
        }
        match self.pages.get_mut(url) {
            Some(state) if *state == PageState::Fetching => *state = outcome,
            Some(state) => {
                tracing::warn!("Invalid state transition {} -> {} for {}", state, outcome, url);
            }
            None => {
                tracing::warn!("Completion for unclaimed URL {}", url);
            }
        }
    }

    /// Current state of a URL, if it has been claimed
    pub fn state(&self, url: &str) -> Option<PageState> {
        self.pages.get(url).copied()
    }

    /// Number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
