// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: analyse one page. The base URL is the only
// required (positional) argument; everything else tunes the link health
// check or the output format.
// =============================================================================

use clap::Parser;

// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "page-inspector",
    version = "0.1.0",
    about = "Analyse a web page's structure and find its unreachable links",
    long_about = "page-inspector fetches a single page, reports its markup version, title, \
                  heading counts and links, classifies the links as internal, external or \
                  login-related, and probes every link concurrently to find the ones that \
                  cannot be reached."
)]
pub struct Cli {
    /// URL of the page to analyse (e.g., http://example.com/)
    ///
    /// Also the base for classifying links as internal or external
    pub url: String,

    /// Output the report in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Per-link probe timeout in seconds (default: 10)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Maximum number of probes in flight at once (default: 50)
    ///
    /// Links beyond this ceiling are queued until a slot frees up
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Give up on the health check after this many seconds
    ///
    /// Links not probed by then are reported separately and the
    /// report is marked incomplete
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Ignore anchors with an empty or missing href
    #[arg(long)]
    pub skip_empty_links: bool,

    /// Keyword marking an internal link as login-related (repeatable)
    ///
    /// Defaults to LOGIN and SIGNIN. Matching is case-insensitive.
    #[arg(long = "login-keyword", value_name = "KEYWORD")]
    pub login_keywords: Vec<String>,
}
