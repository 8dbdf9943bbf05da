//! Reconciliation orchestrator that coordinates scoring, matching, and storage

use crate::engine::matcher::Matcher;
use crate::engine::report::{build_summary, RunSnapshot};
use crate::engine::scoring::MatcherConfig;
use crate::traits::{ReconciliationStore, RecordFilter};
use crate::types::*;

/// Main reconciliation engine over a storage backend
///
/// One `run` is a single-threaded batch computation: it snapshots both
/// pending working sets, pairs them, and commits all status updates together
/// with the run summary through one storage call. Callers that allow
/// concurrent runs must serialize them; two overlapping runs could both
/// claim the same ledger candidate.
pub struct Reconciler<S: ReconciliationStore> {
    store: S,
    matcher: Matcher,
}

impl<S: ReconciliationStore> Reconciler<S> {
    /// Create a reconciler with default matching configuration
    pub fn new(store: S) -> Self {
        Self::with_config(store, MatcherConfig::default())
    }

    /// Create a reconciler with custom tolerances and threshold
    pub fn with_config(store: S, config: MatcherConfig) -> Self {
        Self {
            store,
            matcher: Matcher::new(config),
        }
    }

    /// Execute one reconciliation run and return its summary
    ///
    /// Empty working sets are not an error; the run commits a summary with
    /// all-zero counts. Storage failures abort the run before anything is
    /// written.
    pub async fn run(&mut self) -> ReconResult<ReconciliationSummary> {
        let bank = self.store.fetch_pending(RecordSource::BankStatement).await?;
        let ledger = self.store.fetch_pending(RecordSource::InternalLedger).await?;
        let pending_before = self.store.count_by_status(RecordStatus::Pending).await?;

        tracing::debug!(
            bank = bank.len(),
            ledger = ledger.len(),
            "loaded pending working sets"
        );

        let snapshot = RunSnapshot::capture(&bank, &ledger);
        let outcome = self.matcher.pair_records(&bank, &ledger);

        // Every working-set record reaches a terminal status, so the
        // store-wide pending count drops by exactly both set sizes.
        let pending_count_after = pending_before.saturating_sub(bank.len() + ledger.len());

        let summary = build_summary(snapshot, &outcome, pending_count_after);
        self.store.commit_run(&outcome.updates, &summary).await?;

        tracing::info!(
            matched = summary.matched_count,
            divergent = summary.divergent_count,
            "reconciliation run committed"
        );

        Ok(summary)
    }

    /// List records matching the filter
    pub async fn list_records(&self, filter: RecordFilter) -> ReconResult<Vec<TransactionRecord>> {
        self.store.list_records(filter).await
    }

    /// List summaries of all past runs, oldest first
    pub async fn history(&self) -> ReconResult<Vec<ReconciliationSummary>> {
        self.store.list_summaries().await
    }

    /// Store-wide record counts by source and status
    pub async fn statistics(&self) -> ReconResult<StoreStatistics> {
        self.store.statistics().await
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
