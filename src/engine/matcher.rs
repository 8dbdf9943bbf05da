//! Greedy best-match assignment over the pending working sets

use crate::engine::scoring::{MatcherConfig, SimilarityScorer};
use crate::types::{RecordStatus, RecordUpdate, TransactionRecord};

/// Status mutations and counts produced by one matching pass
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Terminal-status updates for every record in both working sets
    pub updates: Vec<RecordUpdate>,
    /// Number of committed pairs
    pub matched_count: usize,
    /// Number of records, from either side, left divergent
    pub divergent_count: usize,
}

/// Pairs bank-side records with their most similar ledger-side counterparts
///
/// The pass is greedy: bank records are visited in working-set order, each
/// claims its best-scoring unclaimed ledger candidate at or above the match
/// threshold, and a claimed candidate is never reconsidered. Every record in
/// either working set ends the pass with a terminal status update.
pub struct Matcher {
    scorer: SimilarityScorer,
    threshold: f64,
}

impl Matcher {
    /// Create a matcher with the given configuration
    pub fn new(config: MatcherConfig) -> Self {
        let threshold = config.match_threshold;
        Self {
            scorer: SimilarityScorer::new(config),
            threshold,
        }
    }

    /// Run one matching pass over immutable working-set snapshots
    ///
    /// `bank` and `ledger` must contain only pending records; their order is
    /// the iteration order, so equal scores resolve to the earliest ledger
    /// position (the scan only replaces the running best on a strictly
    /// greater score).
    pub fn pair_records(
        &self,
        bank: &[TransactionRecord],
        ledger: &[TransactionRecord],
    ) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();
        let mut claimed = vec![false; ledger.len()];

        for bank_record in bank {
            let mut best: Option<(usize, f64)> = None;

            for (idx, candidate) in ledger.iter().enumerate() {
                if claimed[idx] {
                    continue;
                }

                let score = self.scorer.score(bank_record, candidate);
                if score < self.threshold {
                    continue;
                }

                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((idx, score));
                }
            }

            match best {
                Some((idx, _)) => {
                    let candidate = &ledger[idx];
                    claimed[idx] = true;

                    outcome.updates.push(RecordUpdate {
                        id: bank_record.id.clone(),
                        status: RecordStatus::Matched,
                        linked_id: Some(candidate.id.clone()),
                    });
                    outcome.updates.push(RecordUpdate {
                        id: candidate.id.clone(),
                        status: RecordStatus::Matched,
                        linked_id: Some(bank_record.id.clone()),
                    });
                    outcome.matched_count += 1;
                }
                None => {
                    outcome.updates.push(RecordUpdate {
                        id: bank_record.id.clone(),
                        status: RecordStatus::Divergent,
                        linked_id: None,
                    });
                    outcome.divergent_count += 1;
                }
            }
        }

        // Ledger records nobody claimed are divergent as well
        for (idx, candidate) in ledger.iter().enumerate() {
            if !claimed[idx] {
                outcome.updates.push(RecordUpdate {
                    id: candidate.id.clone(),
                    status: RecordStatus::Divergent,
                    linked_id: None,
                });
                outcome.divergent_count += 1;
            }
        }

        outcome
    }
}
