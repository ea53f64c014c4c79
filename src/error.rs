// src/error.rs
// =============================================================================
// Fatal errors for one page analysis.
//
// Only the boundary can fail a run: a bad base URL, a failed fetch, a
// non-success status or an unreadable body. Everything that goes wrong
// later (re-serialising markup, probing a single link) is downgraded where
// it happens and never shows up here.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error response status code was {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Error loading HTTP response body from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
