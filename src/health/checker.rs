// src/health/checker.rs
// =============================================================================
// Probes every link of a page concurrently and collects the ones that fail.
//
// How it works:
// 1. One task per link is spawned into a JoinSet
// 2. A semaphore caps how many of them probe at the same time; the rest
//    wait for a permit, so a page with thousands of links never opens
//    thousands of sockets
// 3. Every task bounds its probe with a timeout and sends exactly one
//    ProbeOutcome over an mpsc channel
// 4. A single aggregator (the caller's task) reads outcomes until it has
//    one for every link, and only then declares the check done
// 5. If the check is cancelled or its deadline passes first, the
//    aggregator stops reading, aborts all remaining tasks and reports what
//    it has so far, marked incomplete
//
// The channel has room for every outcome, so producers never block on it.
// The aggregator is the only owner of the result sets; tasks just send.
// =============================================================================

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::probe::Prober;
use crate::config::InspectorConfig;

/// Result of probing one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub link: String,
    pub reachable: bool,
}

/// What the health check found out about a set of links.
///
/// `reachable`, `unreachable` and `not_probed` are disjoint and together
/// cover every link that was handed to the checker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Number of distinct links the check was started with
    pub expected: usize,
    /// Number of links that produced an outcome
    pub completed: usize,
    pub reachable: BTreeSet<String>,
    pub unreachable: BTreeSet<String>,
    /// Links abandoned because the check was cancelled before they reported
    pub not_probed: BTreeSet<String>,
    /// True when the check stopped before every link reported
    pub incomplete: bool,
}

// Collects outcomes for a known set of links.
//
// It is "probing" while any link is still pending and "done" once the
// pending set is empty. Outcomes for unknown links, or a second outcome for
// the same link, are ignored so a link can never be counted twice.
struct Aggregator {
    expected: usize,
    order: Vec<String>,
    pending: HashSet<String>,
    reachable: BTreeSet<String>,
    unreachable: BTreeSet<String>,
}

impl Aggregator {
    fn new(links: &[String]) -> Self {
        let mut pending = HashSet::new();
        let order: Vec<String> = links
            .iter()
            .filter(|link| pending.insert(link.to_string()))
            .cloned()
            .collect();

        Self {
            expected: order.len(),
            order,
            pending,
            reachable: BTreeSet::new(),
            unreachable: BTreeSet::new(),
        }
    }

    fn record(&mut self, outcome: ProbeOutcome) {
        if !self.pending.remove(&outcome.link) {
            warn!(link = %outcome.link, "ignoring unexpected probe outcome");
            return;
        }

        debug!(link = %outcome.link, reachable = outcome.reachable, "probe finished");
        if outcome.reachable {
            self.reachable.insert(outcome.link);
        } else {
            self.unreachable.insert(outcome.link);
        }
    }

    fn completed(&self) -> usize {
        self.expected - self.pending.len()
    }

    fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    // Every link reported
    fn finish(self) -> HealthReport {
        self.into_report(BTreeSet::new(), false)
    }

    // Cancelled: whatever is still pending was never probed (or never
    // finished), which is not the same as being unreachable
    fn abandon(mut self) -> HealthReport {
        let not_probed = std::mem::take(&mut self.pending).into_iter().collect();
        self.into_report(not_probed, true)
    }

    // Every producer is gone but some links never reported, e.g. a probe
    // task panicked. Those probes failed, so the links are unreachable.
    fn fail_pending(mut self) -> HealthReport {
        let lost = std::mem::take(&mut self.pending);
        for link in lost {
            warn!(link = %link, "probe task ended without reporting, counting as unreachable");
            self.unreachable.insert(link);
        }
        self.finish()
    }

    fn into_report(self, not_probed: BTreeSet<String>, incomplete: bool) -> HealthReport {
        HealthReport {
            expected: self.expected,
            completed: self.reachable.len() + self.unreachable.len(),
            reachable: self.reachable,
            unreachable: self.unreachable,
            not_probed,
            incomplete,
        }
    }
}

/// Runs the concurrent link health check
pub struct HealthChecker<P: Prober> {
    prober: Arc<P>,
    probe_timeout: Duration,
    max_concurrency: usize,
    deadline: Option<Duration>,
}

impl<P: Prober> HealthChecker<P> {
    pub fn new(prober: P, config: &InspectorConfig) -> Self {
        Self {
            prober: Arc::new(prober),
            probe_timeout: config.probe_timeout,
            max_concurrency: config.max_concurrency.max(1),
            deadline: config.deadline,
        }
    }

    /// Probes every link; stops early only if the configured deadline passes
    #[cfg(test)]
    pub async fn check(&self, links: &[String]) -> HealthReport {
        self.check_until_cancelled(links, CancellationToken::new())
            .await
    }

    /// Probes every link, stopping early if the configured deadline passes
    /// or `cancel` fires.
    ///
    /// When this returns, every probe task has finished or been aborted.
    pub async fn check_until_cancelled(
        &self,
        links: &[String],
        cancel: CancellationToken,
    ) -> HealthReport {
        let mut aggregator = Aggregator::new(links);
        if aggregator.is_done() {
            return aggregator.finish();
        }

        info!(
            links = aggregator.expected,
            max_concurrency = self.max_concurrency,
            timeout_ms = self.probe_timeout.as_millis() as u64,
            "checking links"
        );

        let (tx, mut rx) = mpsc::channel(aggregator.expected);
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for link in &aggregator.order {
            let link = link.clone();
            let tx = tx.clone();
            let prober = Arc::clone(&self.prober);
            let semaphore = Arc::clone(&semaphore);
            let probe_timeout = self.probe_timeout;

            tasks.spawn(async move {
                // Queued here until a slot frees up. The semaphore is never
                // closed, so an error can't actually happen.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };

                let reachable = tokio::time::timeout(probe_timeout, prober.probe(&link))
                    .await
                    .unwrap_or(false);

                // The receiver only goes away once the aggregator has stopped
                // listening, and then nobody needs this outcome
                let _ = tx.send(ProbeOutcome { link, reachable }).await;
            });
        }

        // Only the tasks hold senders now, so the channel closes exactly
        // when the last task is gone
        drop(tx);

        let deadline = deadline_elapsed(self.deadline);
        tokio::pin!(deadline);

        let report = loop {
            if aggregator.is_done() {
                break aggregator.finish();
            }

            tokio::select! {
                // Drain outcomes that already arrived before honouring a
                // cancellation, so they all make it into the report
                biased;

                received = rx.recv() => match received {
                    Some(outcome) => aggregator.record(outcome),
                    None => break aggregator.fail_pending(),
                },
                _ = cancel.cancelled() => {
                    warn!(completed = aggregator.completed(), "health check cancelled");
                    break aggregator.abandon();
                }
                _ = &mut deadline => {
                    warn!(completed = aggregator.completed(), "health check deadline passed");
                    break aggregator.abandon();
                }
            }
        };

        // Aborts whatever is still queued or in flight and waits for it
        tasks.shutdown().await;

        info!(
            completed = report.completed,
            unreachable = report.unreachable.len(),
            incomplete = report.incomplete,
            "link check finished"
        );
        report
    }
}

async fn deadline_elapsed(deadline: Option<Duration>) {
    match deadline {
        Some(after) => tokio::time::sleep(after).await,
        None => futures::future::pending().await,
    }
}
