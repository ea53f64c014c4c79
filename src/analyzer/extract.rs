// src/analyzer/extract.rs
// =============================================================================
// This module pulls the structural facts out of a parsed HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Facts extracted:
// - title: text of the first <title> element ("" if there is none)
// - headings: how many h1..h6 elements the page has, per level
// - links: href of every <a>, in document order, duplicates dropped
//
// Nothing here does I/O and nothing here can fail: a missing element is
// just an empty result.
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::ser::{Serialize, SerializeMap, Serializer};

// Selectors are constants and known to be valid, so a parse failure here
// is a programmer error and panicking is the right response.
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid anchor selector"));
static HEADINGS: LazyLock<[Selector; 6]> = LazyLock::new(|| {
    HeadingCounts::LEVELS.map(|tag| Selector::parse(tag).expect("valid heading selector"))
});

/// Number of heading elements on a page, per level.
///
/// Always has exactly six entries (h1..h6), zero by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingCounts([usize; 6]);

impl HeadingCounts {
    pub const LEVELS: [&'static str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

    /// Count for a level tag such as `"h3"`; `None` for anything that isn't h1..h6
    #[cfg(test)]
    pub fn get(&self, tag: &str) -> Option<usize> {
        Self::LEVELS
            .iter()
            .position(|level| level.eq_ignore_ascii_case(tag))
            .map(|i| self.0[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        Self::LEVELS.iter().copied().zip(self.0.iter().copied())
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

// Serialised as {"h1": n, ..., "h6": n} so the JSON report reads naturally
impl Serialize for HeadingCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Self::LEVELS.len()))?;
        for (tag, count) in self.iter() {
            map.serialize_entry(tag, &count)?;
        }
        map.end()
    }
}

/// Options for link extraction
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Drop anchors whose href is empty or missing
    pub skip_empty_links: bool,
}

// Text content of the first <title> element
pub fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE)
        .next()
        .map(|title| title.text().collect::<String>())
        .unwrap_or_default()
}

// Counts every heading element, level by level
pub fn count_headings(document: &Html) -> HeadingCounts {
    let mut counts = [0usize; 6];
    for (count, selector) in counts.iter_mut().zip(HEADINGS.iter()) {
        *count = document.select(selector).count();
    }
    HeadingCounts(counts)
}

// Collects the href of every anchor, first occurrence wins.
//
// An anchor without an href contributes "" just like href="" does,
// unless the options say to skip empty links.
pub fn extract_links(document: &Html, options: ExtractOptions) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&ANCHOR) {
        let href = anchor.value().attr("href").unwrap_or("");

        if options.skip_empty_links && href.is_empty() {
            continue;
        }

        // insert() returns false when the value was already there
        if seen.insert(href) {
            links.push(href.to_string());
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_text() {
        let doc = Html::parse_document("<html><head><title>Hello <b>World</b></title></head></html>");
        // <title> is raw text, so the markup inside is kept as text
        assert_eq!(extract_title(&doc), "Hello <b>World</b>");
    }

    #[test]
    fn test_first_title_only() {
        let doc = Html::parse_document(
            "<html><head><title>One</title></head><body><svg><title>Two</title></svg></body></html>",
        );
        assert_eq!(extract_title(&doc), "One");
    }

    #[test]
    fn test_missing_title_is_empty() {
        let doc = Html::parse_document("<html><body><p>no title</p></body></html>");
        assert_eq!(extract_title(&doc), "");
    }

    #[test]
    fn test_headings_are_counted_not_flagged() {
        let doc = Html::parse_document(
            "<h1>a</h1><h2>b</h2><h2>c</h2><h3>d</h3><h3>e</h3><h3>f</h3>",
        );
        let counts = count_headings(&doc);

        assert_eq!(counts.get("h1"), Some(1));
        assert_eq!(counts.get("h2"), Some(2));
        assert_eq!(counts.get("h3"), Some(3));
        assert_eq!(counts.get("h4"), Some(0));
        assert_eq!(counts.get("h6"), Some(0));
        assert_eq!(counts.get("h7"), None);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_adding_headings_increases_count_exactly() {
        let base = "<h3>x</h3><p>text</p>";
        let before = count_headings(&Html::parse_document(base)).get("h3").unwrap();

        let k = 4;
        let extended = format!("{}{}", base, "<h3>more</h3>".repeat(k));
        let after = count_headings(&Html::parse_document(&extended)).get("h3").unwrap();

        assert_eq!(after, before + k);
    }

    #[test]
    fn test_empty_document_has_six_zero_levels() {
        let counts = count_headings(&Html::parse_document(""));
        assert_eq!(counts.iter().count(), 6);
        assert!(counts.iter().all(|(_, n)| n == 0));
    }

    #[test]
    fn test_links_deduplicated_in_first_seen_order() {
        let doc = Html::parse_document(
            r##"
            <a href="/b">B</a>
            <a href="http://x.test/a">A</a>
            <a href="/b">B again</a>
            <a href="#top">Top</a>
            <a href="http://x.test/a">A again</a>
            "##,
        );
        let links = extract_links(&doc, ExtractOptions::default());

        assert_eq!(links, vec!["/b", "http://x.test/a", "#top"]);
        let unique: HashSet<_> = links.iter().collect();
        assert_eq!(unique.len(), links.len());
    }

    #[test]
    fn test_empty_hrefs_kept_once_by_default() {
        let doc = Html::parse_document(
            r#"<a href="">empty</a><a name="anchor">no href</a><a href="/x">x</a>"#,
        );
        let links = extract_links(&doc, ExtractOptions::default());
        assert_eq!(links, vec!["", "/x"]);
    }

    #[test]
    fn test_empty_hrefs_skipped_by_policy() {
        let doc = Html::parse_document(r#"<a href="">empty</a><a>none</a><a href="/x">x</a>"#);
        let links = extract_links(
            &doc,
            ExtractOptions {
                skip_empty_links: true,
            },
        );
        assert_eq!(links, vec!["/x"]);
    }

    #[test]
    fn test_heading_counts_serialise_as_map() {
        let counts = count_headings(&Html::parse_document("<h1>a</h1><h5>b</h5>"));
        let json = serde_json::to_value(counts).unwrap();

        assert_eq!(json["h1"], 1);
        assert_eq!(json["h5"], 1);
        assert_eq!(json["h2"], 0);
        assert_eq!(json.as_object().unwrap().len(), 6);
    }
}
