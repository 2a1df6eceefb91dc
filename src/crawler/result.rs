//! The per-crawl aggregate contact record
//!
//! One `CrawlResult` exists per crawl invocation. Categories are ordered
//! string sets, so merging the same candidate twice is a no-op and the final
//! record needs no separate deduplication pass.

use crate::crawler::extractor::PageContacts;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of contact categories in a record
pub const CATEGORY_COUNT: usize = 6;

/// Column names shared by both export layouts, in canonical order
pub const CATEGORY_NAMES: [&str; CATEGORY_COUNT] =
    ["emails", "phones", "linkedin", "facebook", "twitter", "instagram"];

/// Deduplicated contact information aggregated over one crawl
///
/// The wire shape matches the service's JSON: the seed URL is serialized as
/// `url`, and absent categories deserialize as empty sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResult {
    /// The absolute URL the crawl started from; immutable once set
    #[serde(rename = "url")]
    pub seed_url: String,

    #[serde(default)]
    pub emails: BTreeSet<String>,
    #[serde(default)]
    pub phones: BTreeSet<String>,
    #[serde(default)]
    pub linkedin: BTreeSet<String>,
    #[serde(default)]
    pub facebook: BTreeSet<String>,
    #[serde(default)]
    pub twitter: BTreeSet<String>,
    #[serde(default)]
    pub instagram: BTreeSet<String>,
}

impl CrawlResult {
    /// Creates an empty record for a crawl starting at `seed_url`
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            emails: BTreeSet::new(),
            phones: BTreeSet::new(),
            linkedin: BTreeSet::new(),
            facebook: BTreeSet::new(),
            twitter: BTreeSet::new(),
            instagram: BTreeSet::new(),
        }
    }

    /// Merges one page's candidates into the record
    ///
    /// Set-union semantics per category: inserting a duplicate is a no-op.
    /// Safe to call once per visited page, in any order.
    pub fn merge(&mut self, page: &PageContacts) {
        self.emails.extend(page.emails.iter().cloned());
        self.phones.extend(page.phones.iter().cloned());
        self.linkedin.extend(page.linkedin.iter().cloned());
        self.facebook.extend(page.facebook.iter().cloned());
        self.twitter.extend(page.twitter.iter().cloned());
        self.instagram.extend(page.instagram.iter().cloned());
    }

    /// The categories in canonical column order
    pub fn categories(&self) -> [&BTreeSet<String>; CATEGORY_COUNT] {
        [
            &self.emails,
            &self.phones,
            &self.linkedin,
            &self.facebook,
            &self.twitter,
            &self.instagram,
        ]
    }

    /// Length of the longest category; the row count of a delimited export
    pub fn max_category_len(&self) -> usize {
        self.categories()
            .iter()
            .map(|set| set.len())
            .max()
            .unwrap_or(0)
    }

    /// Total number of contact values across all categories
    pub fn contact_count(&self) -> usize {
        self.categories().iter().map(|set| set.len()).sum()
    }
}
