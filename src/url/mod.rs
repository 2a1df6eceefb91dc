//! URL handling module for leadsift
//!
//! This module resolves raw `href` values found on a page against the URL of
//! the page they were found on, producing the absolute URLs the traversal
//! engine fetches.

use url::Url;

/// Resolves a link href against the URL of the page it appeared on
///
/// Standard URL-joining rules apply: scheme and host are inherited from
/// `base` when `href` lacks them, and `.`/`..` path segments are normalized.
///
/// Returns `None` for hrefs that cannot become fetchable page URLs:
/// - empty or whitespace-only hrefs
/// - fragment-only links (same page anchors)
/// - `mailto:`, `tel:`, `javascript:` and `data:` schemes
/// - hrefs that fail to join against the base
/// - anything that resolves to a non-HTTP(S) scheme
///
/// A `None` is never an error for the crawl; the caller simply skips the
/// branch.
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Fragment-only links point back at the page being processed
    if href.starts_with('#') {
        return None;
    }

    // Contact and script schemes are extraction targets, not pages
    if href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/team/about").unwrap()
    }

    #[test]
    fn test_absolute_href_passes_through() {
        let resolved = resolve_link(&base(), "https://other.com/page").unwrap();
        assert_eq!(resolved.as_str(), "https://other.com/page");
    }

    #[test]
    fn test_root_relative_href() {
        let resolved = resolve_link(&base(), "/contact").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/contact");
    }

    #[test]
    fn test_path_relative_href() {
        let resolved = resolve_link(&base(), "staff").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/team/staff");
    }

    #[test]
    fn test_parent_segments_normalized() {
        let resolved = resolve_link(&base(), "../press/./kit").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/press/kit");
    }

    #[test]
    fn test_scheme_inherited_from_base() {
        let resolved = resolve_link(&base(), "//cdn.example.com/logo").unwrap();
        assert_eq!(resolved.scheme(), "https");
        assert_eq!(resolved.host_str(), Some("cdn.example.com"));
    }

    #[test]
    fn test_empty_href_skipped() {
        assert!(resolve_link(&base(), "").is_none());
        assert!(resolve_link(&base(), "   ").is_none());
    }

    #[test]
    fn test_fragment_only_skipped() {
        assert!(resolve_link(&base(), "#section").is_none());
    }

    #[test]
    fn test_mailto_skipped() {
        assert!(resolve_link(&base(), "mailto:hello@example.com").is_none());
    }

    #[test]
    fn test_tel_skipped() {
        assert!(resolve_link(&base(), "tel:+15551234567").is_none());
    }

    #[test]
    fn test_javascript_skipped() {
        assert!(resolve_link(&base(), "javascript:void(0)").is_none());
    }

    #[test]
    fn test_data_uri_skipped() {
        assert!(resolve_link(&base(), "data:text/html,<h1>x</h1>").is_none());
    }

    #[test]
    fn test_non_http_scheme_skipped() {
        assert!(resolve_link(&base(), "ftp://example.com/file").is_none());
    }

    #[test]
    fn test_href_with_whitespace_trimmed() {
        let resolved = resolve_link(&base(), "  /contact  ").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/contact");
    }
}
