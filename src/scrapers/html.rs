//! HTML result-page extraction.
//!
//! Search engines and discussion forums are scraped with fixed CSS selectors
//! tied to each site's current markup. When the markup changes the selectors
//! simply match nothing and the source yields zero titles.

use crate::config::ConfigError;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// Parsed selectors for one HTML source, compiled once per run.
#[derive(Debug, Clone)]
pub struct HtmlSelectors {
    item: Selector,
    link: Option<Selector>,
}

impl HtmlSelectors {
    /// Parse the item selector and the optional link selector.
    ///
    /// # Arguments
    ///
    /// * `item` - CSS selector for each result element
    /// * `link` - Optional CSS selector for the descendant holding the title
    ///
    /// # Returns
    ///
    /// The compiled selectors, or [`ConfigError::Invalid`] naming the
    /// selector that failed to parse.
    pub fn compile(item: &str, link: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self {
            item: parse_selector(item)?,
            link: link.map(parse_selector).transpose()?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::Invalid(format!("bad selector '{selector}': {e}")))
}

/// Extract up to `max_results` title strings from an HTML document.
///
/// Each element matching the item selector contributes one title. When a
/// link selector is set, the title comes from the first matching descendant
/// and items without one are skipped.
///
/// # Arguments
///
/// * `html` - Raw HTML document
/// * `selectors` - Compiled selectors for the source
/// * `max_results` - Cap applied to item matches, before the link lookup
///
/// # Returns
///
/// Non-empty titles in document order, with whitespace runs collapsed.
#[instrument(level = "debug", skip(html, selectors), fields(bytes = html.len()))]
pub fn extract_titles(html: &str, selectors: &HtmlSelectors, max_results: usize) -> Vec<String> {
    let document = Html::parse_document(html);

    let titles: Vec<String> = document
        .select(&selectors.item)
        .take(max_results)
        .filter_map(|element| match &selectors.link {
            Some(selector) => element.select(selector).next(),
            None => Some(element),
        })
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect();

    debug!(count = titles.len(), "Extracted HTML titles");
    titles
}

/// Visible text of an element with whitespace runs collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DDG_PAGE: &str = r#"
        <html><body>
          <div class="result"><h2><a class="result__a" href="https://a">  Atlassian <b>System</b>
              Design Interview </a></h2></div>
          <div class="result"><h2><a class="result__a" href="https://b">Unrelated Topic</a></h2></div>
          <a class="result__snippet" href="https://c">Snippet with system design</a>
          <div class="result"><h2><a class="result__a" href="https://d"></a></h2></div>
        </body></html>
    "#;

    fn selectors(item: &str, link: Option<&str>) -> HtmlSelectors {
        HtmlSelectors::compile(item, link).unwrap()
    }

    #[test]
    fn test_extracts_anchor_text() {
        let titles = extract_titles(DDG_PAGE, &selectors("a.result__a", None), 5);
        assert_eq!(
            titles,
            vec![
                "Atlassian System Design Interview".to_string(),
                "Unrelated Topic".to_string()
            ]
        );
    }

    #[test]
    fn test_caps_result_count() {
        let titles = extract_titles(DDG_PAGE, &selectors("a.result__a", None), 1);
        assert_eq!(titles, vec!["Atlassian System Design Interview".to_string()]);
    }

    #[test]
    fn test_link_inside_item() {
        let page = r#"
            <div class="topic-title"><a href="/1">PayPal system design onsite</a><a href="/x">ignored</a></div>
            <div class="topic-title"><span>no link here</span></div>
            <div class="topic-title"><a href="/2">Design a ledger</a></div>
        "#;
        let titles = extract_titles(page, &selectors("div.topic-title", Some("a")), 5);
        assert_eq!(
            titles,
            vec!["PayPal system design onsite".to_string(), "Design a ledger".to_string()]
        );
    }

    #[test]
    fn test_cap_applies_before_link_lookup() {
        let page = r#"
            <div class="topic-title"><span>no link</span></div>
            <div class="topic-title"><a href="/2">Design a ledger</a></div>
        "#;
        let titles = extract_titles(page, &selectors("div.topic-title", Some("a")), 1);
        assert!(titles.is_empty());
    }

    #[test]
    fn test_changed_markup_yields_nothing() {
        let titles = extract_titles("<html><p>blocked</p></html>", &selectors("a.result__a", None), 5);
        assert!(titles.is_empty());
    }

    #[test]
    fn test_bad_selector_fails_to_compile() {
        let err = HtmlSelectors::compile("a.result__a", Some("a[[")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("a[["));
    }
}
