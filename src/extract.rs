//! Structural extraction of the search-results fragment.
//!
//! Walks the fetched page as a DOM instead of matching closing-tag runs
//! with text patterns, so formatting variance in the live site's output
//! (indentation, attribute order, extra wrappers) cannot break it.

use scraper::{Html, Selector};
use serde::Serialize;

/// One result link found inside the fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLink {
    /// Mirror-local href (the page may or may not exist in the mirror yet).
    pub href: String,
    /// Anchor text, whitespace-collapsed.
    pub text: String,
}

/// Isolate the results container from a full fetched page.
///
/// Returns `None` when the structural anchor is not found, meaning the
/// page shape itself didn't match. A present-but-empty container is a
/// valid "zero results" fragment and is still `Some`.
pub fn extract_results(page: &str, container_class: &str) -> Option<String> {
    let selector = Selector::parse(&format!("div.{container_class}")).ok()?;
    let document = Html::parse_document(page);
    document.select(&selector).next().map(|el| el.html())
}

/// Collect every result link inside an extracted fragment.
pub fn result_links(fragment: &str, link_class: &str) -> Vec<ResultLink> {
    let selector = match Selector::parse(&format!("a.{link_class}")) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let document = Html::parse_fragment(fragment);
    document
        .select(&selector)
        .filter_map(|el| {
            let href = el.value().attr("href")?.to_string();
            let text = el
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            Some(ResultLink { href, text })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = concat!(
        r#"<html><body><main><div class="l-container">"#,
        r#"<div class="p-result">"#,
        r#"<div class="p-result__announce"><p>2 hits</p></div>"#,
        r#"<ul>"#,
        r#"<li class="p-result__item"><a class="p-result__link" href="/snapshot/a/">Alpha  page</a></li>"#,
        r#"<li class="p-result__item"><a class="p-result__link" href="/snapshot/b/">Beta</a></li>"#,
        r#"</ul></div></div></main></body></html>"#,
    );

    #[test]
    fn extracts_the_results_container() {
        let fragment = extract_results(PAGE, "p-result").unwrap();
        assert!(fragment.starts_with(r#"<div class="p-result">"#));
        assert!(fragment.contains("p-result__item"));
        assert!(!fragment.contains("<main"));
    }

    #[test]
    fn absent_anchor_yields_none() {
        let page = "<html><body><main><p>not a results page</p></main></body></html>";
        assert!(extract_results(page, "p-result").is_none());
    }

    #[test]
    fn empty_container_is_still_a_fragment() {
        let page = r#"<html><body><div class="p-result"></div></body></html>"#;
        let fragment = extract_results(page, "p-result").unwrap();
        assert!(!fragment.contains("p-result__item"));
    }

    #[test]
    fn collects_links_with_collapsed_text() {
        let fragment = extract_results(PAGE, "p-result").unwrap();
        let links = result_links(&fragment, "p-result__link");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "/snapshot/a/");
        assert_eq!(links[0].text, "Alpha page");
        assert_eq!(links[1].text, "Beta");
    }

    #[test]
    fn anchors_without_href_are_skipped() {
        let links = result_links(r#"<a class="p-result__link">dead</a>"#, "p-result__link");
        assert!(links.is_empty());
    }
}
