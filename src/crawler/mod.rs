//! Crawl engine for leadsift
//!
//! The traversal coordinator drives fetches through a bounded worker pool,
//! the extractor classifies page links into contact categories, and the
//! visited set guarantees at-most-once fetching per crawl invocation.

mod coordinator;
mod extractor;
mod fetcher;
mod result;
mod visited;

pub use coordinator::Crawler;
pub use extractor::{extract_contacts, PageContacts};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use result::{CrawlResult, CATEGORY_COUNT, CATEGORY_NAMES};
pub use visited::{PageState, VisitSet};
