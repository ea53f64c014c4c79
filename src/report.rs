// src/report.rs
// =============================================================================
// Puts the analysis, the link classification and the health check together
// into the single record we print (or serialise to JSON).
//
// Assembly does no I/O and cannot fail.
// =============================================================================

use serde::Serialize;

use crate::analyzer::{AnalysisResult, HeadingCounts, LinkClassification};
use crate::health::HealthReport;

/// Everything we found out about one page
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub url: String,
    pub version: Option<String>,
    pub title: String,
    pub headings: HeadingCounts,
    pub links: Vec<String>,
    pub classification: LinkClassification,
    pub health: HealthReport,
}

impl Report {
    pub fn assemble(
        url: &str,
        analysis: AnalysisResult,
        classification: LinkClassification,
        health: HealthReport,
    ) -> Self {
        Self {
            url: url.to_string(),
            version: analysis.version,
            title: analysis.title,
            headings: analysis.headings,
            links: analysis.links,
            classification,
            health,
        }
    }

    /// Links that were probed and failed
    pub fn unreachable_count(&self) -> usize {
        self.health.unreachable.len()
    }

    /// True when every link was probed and none of them failed
    pub fn is_healthy(&self) -> bool {
        !self.health.incomplete && self.health.unreachable.is_empty()
    }
}
