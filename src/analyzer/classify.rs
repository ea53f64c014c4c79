// src/analyzer/classify.rs
// =============================================================================
// Sorts a page's links into internal and external ones, and spots the
// internal links that look like a login page.
//
// Rules:
// - internal: starts with the base URL, or with "/" or "#"
// - external: everything else
// - login candidates: internal links whose uppercased value contains one
//   of the login keywords
//
// Both the base URL and the keywords are plain arguments; the functions
// are pure and accept any input, including an empty link list.
// =============================================================================

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkClassification {
    /// Links pointing back into the analysed site, in page order
    pub internal: Vec<String>,
    /// Everything that is not internal, in page order
    pub external: Vec<String>,
    /// Subset of `internal` that looks login-related
    pub login_candidates: Vec<String>,
}

// Is this link internal relative to `base_url`?
pub fn is_internal(base_url: &str, link: &str) -> bool {
    link.starts_with(base_url) || link.starts_with('/') || link.starts_with('#')
}

// Does the uppercased link contain any of the (uppercase) keywords?
pub fn is_login_candidate<S: AsRef<str>>(link: &str, keywords: &[S]) -> bool {
    let upper = link.to_uppercase();
    keywords
        .iter()
        .any(|keyword| upper.contains(&keyword.as_ref().to_uppercase()))
}

pub fn classify_links<S: AsRef<str>>(
    base_url: &str,
    links: &[String],
    login_keywords: &[S],
) -> LinkClassification {
    // partition keeps the relative order of both halves
    let (internal, external): (Vec<String>, Vec<String>) = links
        .iter()
        .cloned()
        .partition(|link| is_internal(base_url, link));

    let login_candidates = internal
        .iter()
        .filter(|link| is_login_candidate(link, login_keywords))
        .cloned()
        .collect();

    LinkClassification {
        internal,
        external,
        login_candidates,
    }
}
