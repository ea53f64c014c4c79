// src/analyzer/mod.rs
// =============================================================================
// This module turns a fetched page into structured facts.
//
// Submodules:
// - version: which markup standard the page declares
// - extract: title, heading counts and links
// - classify: internal/external/login split of the links
//
// All of it is synchronous and pure; only the health check does I/O.
// =============================================================================

mod classify;
mod extract;
mod version;

pub use classify::{classify_links, LinkClassification};
pub use extract::{ExtractOptions, HeadingCounts};

use extract::{count_headings, extract_links, extract_title};
use version::detect_document_version;

use scraper::Html;
use serde::Serialize;

/// Structural facts about one page
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Declared markup standard, `None` when no known DOCTYPE was found
    pub version: Option<String>,
    pub title: String,
    pub headings: HeadingCounts,
    /// Distinct hrefs in first-seen order
    pub links: Vec<String>,
}

// Parses the page source and extracts everything in one pass over the tree
pub fn analyze_document(source: &str, options: ExtractOptions) -> AnalysisResult {
    let document = Html::parse_document(source);

    AnalysisResult {
        version: detect_document_version(source, &document).map(str::to_string),
        title: extract_title(&document),
        headings: count_headings(&document),
        links: extract_links(&document, options),
    }
}
