//! Contact extraction from page markup
//!
//! This module scans the hyperlinks of a fetched page and classifies each
//! `href` into contact categories. Every href is checked against all six
//! category rules independently, so a single link can land in more than one
//! category; the raw href list is returned alongside for the traversal engine
//! to resolve and recurse into.

use scraper::{Html, Selector};

/// Candidate contact values extracted from one page
///
/// Candidates are raw strings and may contain duplicates; deduplication
/// happens when they are merged into the crawl-scoped result.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageContacts {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub linkedin: Vec<String>,
    pub facebook: Vec<String>,
    pub twitter: Vec<String>,
    pub instagram: Vec<String>,

    /// Every raw href on the page, in document order, for link-following
    pub links: Vec<String>,
}

impl PageContacts {
    /// True when no contact candidate was found (links don't count)
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
            && self.phones.is_empty()
            && self.linkedin.is_empty()
            && self.facebook.is_empty()
            && self.twitter.is_empty()
            && self.instagram.is_empty()
    }
}

/// Extracts contact candidates and raw links from an HTML document
///
/// Classification rules, each applied independently per href:
/// - `mailto:` prefix → email candidate (prefix stripped)
/// - `tel:` prefix → phone candidate (prefix stripped)
/// - contains `linkedin.com` → linkedin candidate (raw href)
/// - contains `facebook.com` → facebook candidate (raw href)
/// - contains `twitter.com` → twitter candidate (raw href)
/// - contains `instagram.com` → instagram candidate (raw href)
pub fn extract_contacts(html: &str) -> PageContacts {
    let document = Html::parse_document(html);
    let mut contacts = PageContacts::default();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            let href = match element.value().attr("href") {
                Some(href) => href.trim(),
                None => continue,
            };
            if href.is_empty() {
                continue;
            }

            if let Some(address) = href.strip_prefix("mailto:") {
                contacts.emails.push(address.to_string());
            }
            if let Some(number) = href.strip_prefix("tel:") {
                contacts.phones.push(number.to_string());
            }
            if href.contains("linkedin.com") {
                contacts.linkedin.push(href.to_string());
            }
            if href.contains("facebook.com") {
                contacts.facebook.push(href.to_string());
            }
            if href.contains("twitter.com") {
                contacts.twitter.push(href.to_string());
            }
            if href.contains("instagram.com") {
                contacts.instagram.push(href.to_string());
            }

            contacts.links.push(href.to_string());
        }
    }

    contacts
}
