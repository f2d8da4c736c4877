//! The per-trigger run: fetch, filter, dedup, notify, persist.

use dealwatch_alerts::{EmailError, Mailer, Notifier, SeenStore, StoreError};
use dealwatch_core::{keyword_match, select_new_deals};
use dealwatch_feeds::{DealSource, FeedError};
use thiserror::Error;
use tracing::{debug, info};

/// Phases of one run. The path is linear; any component failure goes
/// straight to `Failed` with no retry or partial recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Fetching,
    Filtering,
    Deduping,
    Notifying,
    Persisting,
    Done,
    Failed,
}

impl RunPhase {
    /// Next phase on the success path. Terminal phases stay put.
    pub fn next(self) -> Self {
        match self {
            RunPhase::Fetching => RunPhase::Filtering,
            RunPhase::Filtering => RunPhase::Deduping,
            RunPhase::Deduping => RunPhase::Notifying,
            RunPhase::Notifying => RunPhase::Persisting,
            RunPhase::Persisting => RunPhase::Done,
            RunPhase::Done => RunPhase::Done,
            RunPhase::Failed => RunPhase::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Failed)
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("network error: {0}")]
    Network(#[from] FeedError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("email error: {0}")]
    Email(#[from] EmailError),
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunReport {
    pub fetched: usize,
    pub matched: usize,
    pub notified: usize,
    pub seen_total: usize,
}

/// Execute one run end to end.
///
/// The seen set is loaded once at the start and written back once at the
/// end. Notification happens BEFORE the seen set is persisted: a failure
/// between the two can repeat a notification on the next run, which is the
/// accepted at-least-once behavior. The reverse order would instead drop
/// notifications when the post-persist send fails.
pub async fn run_check<S, M>(
    source: &S,
    store: &SeenStore,
    notifier: &Notifier<M>,
    keywords: &[String],
) -> Result<RunReport, RunError>
where
    S: DealSource + ?Sized,
    M: Mailer,
{
    let mut seen = store.load().await?;

    let mut phase = RunPhase::Fetching;
    let deals = source.fetch_deals().await?;
    info!(?phase, fetched = deals.len(), seen = seen.len(), "Fetched deals");

    phase = phase.next();
    let matched = deals.iter().filter(|d| keyword_match(d, keywords)).count();
    debug!(?phase, matched, "Applied keyword filter");

    phase = phase.next();
    let fresh = select_new_deals(&deals, &seen, keywords);
    debug!(?phase, new = fresh.len(), "Dropped already-seen deals");

    phase = phase.next();
    let notified = notifier.notify(&fresh).await?;

    phase = phase.next();
    if !fresh.is_empty() {
        seen.extend_from_deals(&fresh);
        store.save(&seen).await?;
    } else {
        debug!(?phase, "Nothing notified, seen set left untouched");
    }

    phase = phase.next();
    info!(?phase, notified, seen_total = seen.len(), "Run complete");

    Ok(RunReport {
        fetched: deals.len(),
        matched,
        notified,
        seen_total: seen.len(),
    })
}
