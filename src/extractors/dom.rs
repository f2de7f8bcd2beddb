//! CSS selector helpers over a single listing block.

use scraper::{ElementRef, Selector};

/// Compile a static selector; `None` only if the selector text is invalid.
pub fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Whitespace-collapsed text of an element, `None` when blank.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<Vec<_>>().join(" ");
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Text of the first non-blank match under `scope`.
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).find_map(element_text)
}

/// First non-blank value of `attr` among matches under `scope`.
pub fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope.select(selector).find_map(|el| {
        el.value()
            .attr(attr)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_first_text_skips_blank() {
        let html = Html::parse_fragment(
            r#"<div><h2> </h2><h2>
                Sea   Breeze
                <span>Cafe</span></h2></div>"#,
        );
        let h2 = selector("h2").unwrap();
        let root = html.root_element();
        assert_eq!(first_text(root, &h2).as_deref(), Some("Sea Breeze Cafe"));
    }

    #[test]
    fn test_first_attr() {
        let html = Html::parse_fragment(
            r#"<div><a data-phone="">x</a><a data-phone=" 98765 43210 ">y</a></div>"#,
        );
        let a = selector("a").unwrap();
        assert_eq!(
            first_attr(html.root_element(), &a, "data-phone").as_deref(),
            Some("98765 43210")
        );
    }

    #[test]
    fn test_invalid_selector() {
        assert!(selector("div[").is_none());
    }
}
