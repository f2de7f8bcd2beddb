//! Website link recovery
//!
//! Listing pages wrap outbound business links in a tracking redirect
//! (`.../redirect?redirectUrl=<percent-encoded target>`). The wrapper is
//! discarded and the decoded target kept.

use scraper::{ElementRef, Selector};
use url::{form_urlencoded, Url};

use super::dom;

const REDIRECT_PARAMS: &[&str] = &["redirectUrl", "redirecturl", "redirect_url"];
const WEBSITE_MARKER: &str = "website";

/// First anchor under `block` that points at the business website.
pub fn find_website(block: ElementRef<'_>) -> Option<String> {
    let anchors = anchor_selector()?;
    block.select(&anchors).find_map(|anchor| {
        let href = anchor.value().attr("href")?.trim();
        let text = dom::element_text(anchor).unwrap_or_default();
        let marked = text.to_lowercase().contains(WEBSITE_MARKER)
            || href.to_lowercase().contains(WEBSITE_MARKER);

        match redirect_target(href) {
            Some(target) => absolute_http(&target),
            None if marked => absolute_http(href),
            None => None,
        }
    })
}

/// Decoded value of the redirect parameter in `href`, if present.
pub fn redirect_target(href: &str) -> Option<String> {
    let query = href.split_once('?').map(|(_, q)| q)?;
    let query = query.split('#').next().unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| REDIRECT_PARAMS.contains(&&**key))
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
}

/// `candidate` if it parses as an absolute http(s) URL.
fn absolute_http(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    let parsed = Url::parse(candidate).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| candidate.to_string())
}

fn anchor_selector() -> Option<Selector> {
    dom::selector("a[href]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn website_in(html: &str) -> Option<String> {
        let doc = Html::parse_fragment(html);
        find_website(doc.root_element())
    }

    #[test]
    fn test_redirect_unwrapped() {
        assert_eq!(
            redirect_target("/redirect?redirectUrl=https%3A%2F%2Fexample.com").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            website_in(r#"<a href="https://www.justdial.com/rd?x=1&redirectUrl=https%3A%2F%2Fexample.com">Visit</a>"#)
                .as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_marked_direct_link() {
        assert_eq!(
            website_in(r#"<a href="/menu">Menu</a><a href="https://seabreeze.in/">Website</a>"#)
                .as_deref(),
            Some("https://seabreeze.in/")
        );
    }

    #[test]
    fn test_unmarked_links_ignored() {
        assert_eq!(website_in(r#"<a href="https://maps.example.com">Directions</a>"#), None);
        assert_eq!(website_in(r#"<a href="/website-builder">Website</a>"#), None);
        assert_eq!(website_in(r#"<a href="javascript:void(0)">Website</a>"#), None);
    }

    #[test]
    fn test_empty_redirect_param() {
        assert_eq!(redirect_target("/rd?redirectUrl="), None);
        assert_eq!(redirect_target("/no-query"), None);
    }
}
