// src/config.rs
// =============================================================================
// Tunables for a single analysis run.
//
// Defaults live here so the library code never reaches for magic numbers;
// the CLI only overrides what the user passed explicitly.
// =============================================================================

use std::time::Duration;

use crate::cli::Cli;

/// Keywords that mark an internal link as login-related (matched against the
/// uppercased link).
pub const DEFAULT_LOGIN_KEYWORDS: &[&str] = &["LOGIN", "SIGNIN"];

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_CONCURRENCY: usize = 50;

#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Upper bound on a single link probe, including connect
    pub probe_timeout: Duration,
    /// Upper bound on the initial page download
    pub fetch_timeout: Duration,
    /// How many probes may be in flight at once; the rest wait their turn
    pub max_concurrency: usize,
    /// Overall budget for the health check. `None` waits for every probe.
    pub deadline: Option<Duration>,
    /// Drop `href=""` (and anchors without href) during extraction
    pub skip_empty_links: bool,
    pub login_keywords: Vec<String>,
    pub user_agent: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            deadline: None,
            skip_empty_links: false,
            login_keywords: DEFAULT_LOGIN_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            user_agent: format!("page-inspector/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&Cli> for InspectorConfig {
    fn from(cli: &Cli) -> Self {
        let mut config = Self::default();

        if let Some(secs) = cli.timeout_secs {
            config.probe_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = cli.max_concurrency {
            // A ceiling of zero would never let a probe start
            config.max_concurrency = limit.max(1);
        }
        config.deadline = cli.deadline_secs.map(Duration::from_secs);
        config.skip_empty_links = cli.skip_empty_links;
        if !cli.login_keywords.is_empty() {
            config.login_keywords = cli
                .login_keywords
                .iter()
                .map(|k| k.to_uppercase())
                .collect();
        }

        config
    }
}
