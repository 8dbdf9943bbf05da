//! Aggregate statistics for a completed reconciliation run

use bigdecimal::BigDecimal;

use crate::engine::matcher::MatchOutcome;
use crate::types::{ReconciliationSummary, TransactionRecord};

/// Pre-run counts and totals for both working sets
///
/// Captured before any status mutation, since the summary reports the sets
/// as they were considered, not as they ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSnapshot {
    pub bank_count: usize,
    pub ledger_count: usize,
    pub bank_total_amount: BigDecimal,
    pub ledger_total_amount: BigDecimal,
}

impl RunSnapshot {
    /// Snapshot the working sets as loaded
    pub fn capture(bank: &[TransactionRecord], ledger: &[TransactionRecord]) -> Self {
        Self {
            bank_count: bank.len(),
            ledger_count: ledger.len(),
            bank_total_amount: bank.iter().map(|r| &r.amount).sum(),
            ledger_total_amount: ledger.iter().map(|r| &r.amount).sum(),
        }
    }
}

/// Build the summary for one run from the snapshot and the matcher's counts
///
/// The amount difference is signed: bank total minus ledger total.
pub fn build_summary(
    snapshot: RunSnapshot,
    outcome: &MatchOutcome,
    pending_count_after: usize,
) -> ReconciliationSummary {
    let amount_difference = &snapshot.bank_total_amount - &snapshot.ledger_total_amount;
    let notes = format!(
        "Reconciliation run completed with {} matched pairs and {} divergent records.",
        outcome.matched_count, outcome.divergent_count
    );

    ReconciliationSummary {
        processed_at: chrono::Utc::now().naive_utc(),
        bank_count: snapshot.bank_count,
        ledger_count: snapshot.ledger_count,
        matched_count: outcome.matched_count,
        divergent_count: outcome.divergent_count,
        pending_count_after,
        bank_total_amount: snapshot.bank_total_amount,
        ledger_total_amount: snapshot.ledger_total_amount,
        amount_difference,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecordKind, RecordSource};
    use chrono::NaiveDate;

    fn record(id: &str, amount: &str, source: RecordSource) -> TransactionRecord {
        TransactionRecord::new(
            id.to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            "Payment".to_string(),
            amount.parse().unwrap(),
            RecordKind::Debit,
            source,
        )
    }

    #[test]
    fn snapshot_sums_each_side() {
        let bank = vec![
            record("b1", "100.50", RecordSource::BankStatement),
            record("b2", "200.00", RecordSource::BankStatement),
        ];
        let ledger = vec![record("l1", "250.25", RecordSource::InternalLedger)];

        let snapshot = RunSnapshot::capture(&bank, &ledger);
        assert_eq!(snapshot.bank_count, 2);
        assert_eq!(snapshot.ledger_count, 1);
        assert_eq!(snapshot.bank_total_amount, "300.50".parse::<BigDecimal>().unwrap());
        assert_eq!(snapshot.ledger_total_amount, "250.25".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn amount_difference_is_signed() {
        let bank = vec![record("b1", "100.00", RecordSource::BankStatement)];
        let ledger = vec![record("l1", "250.00", RecordSource::InternalLedger)];

        let summary = build_summary(
            RunSnapshot::capture(&bank, &ledger),
            &MatchOutcome::default(),
            0,
        );
        assert_eq!(summary.amount_difference, "-150.00".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn empty_sets_produce_zero_summary() {
        let summary = build_summary(RunSnapshot::capture(&[], &[]), &MatchOutcome::default(), 0);

        assert_eq!(summary.bank_count, 0);
        assert_eq!(summary.ledger_count, 0);
        assert_eq!(summary.matched_count, 0);
        assert_eq!(summary.divergent_count, 0);
        assert_eq!(summary.bank_total_amount, BigDecimal::from(0));
        assert_eq!(summary.amount_difference, BigDecimal::from(0));
    }

    #[test]
    fn notes_report_both_counts() {
        let outcome = MatchOutcome {
            updates: Vec::new(),
            matched_count: 3,
            divergent_count: 2,
        };
        let summary = build_summary(RunSnapshot::capture(&[], &[]), &outcome, 0);

        assert!(summary.notes.contains("3 matched"));
        assert!(summary.notes.contains("2 divergent"));
    }
}
