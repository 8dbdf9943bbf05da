//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
///
/// Records are kept in insertion order, which is the working-set order
/// reconciliation runs observe. Cloning shares the underlying data.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    records: Arc<RwLock<Vec<TransactionRecord>>>,
    summaries: Arc<RwLock<Vec<ReconciliationSummary>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            summaries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Clear all records and summaries (useful for testing)
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
        self.summaries.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReconciliationStore for MemoryStorage {
    async fn insert_records(&mut self, new_records: Vec<TransactionRecord>) -> ReconResult<usize> {
        let mut records = self.records.write().unwrap();

        for record in &new_records {
            if records.iter().any(|existing| existing.id == record.id) {
                return Err(ReconError::Validation(format!(
                    "Record with ID '{}' already exists",
                    record.id
                )));
            }
        }

        let inserted = new_records.len();
        records.extend(new_records);
        Ok(inserted)
    }

    async fn get_record(&self, record_id: &str) -> ReconResult<Option<TransactionRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .find(|record| record.id == record_id)
            .cloned())
    }

    async fn list_records(&self, filter: RecordFilter) -> ReconResult<Vec<TransactionRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn fetch_pending(&self, source: RecordSource) -> ReconResult<Vec<TransactionRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|record| record.source == source && record.status == RecordStatus::Pending)
            .cloned()
            .collect())
    }

    async fn count_by_status(&self, status: RecordStatus) -> ReconResult<usize> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|record| record.status == status)
            .count())
    }

    async fn commit_run(
        &mut self,
        updates: &[RecordUpdate],
        summary: &ReconciliationSummary,
    ) -> ReconResult<()> {
        let mut records = self.records.write().unwrap();

        // Resolve every target before mutating anything, so a bad batch
        // leaves the store untouched. Matched and divergent are terminal.
        let mut indices = Vec::with_capacity(updates.len());
        for update in updates {
            let index = records
                .iter()
                .position(|record| record.id == update.id)
                .ok_or_else(|| ReconError::RecordNotFound(update.id.clone()))?;
            if records[index].status != RecordStatus::Pending {
                return Err(ReconError::Validation(format!(
                    "Record '{}' is no longer pending",
                    update.id
                )));
            }
            indices.push(index);
        }

        for (update, index) in updates.iter().zip(indices) {
            let record = &mut records[index];
            record.status = update.status.clone();
            record.linked_id = update.linked_id.clone();
        }

        self.summaries.write().unwrap().push(summary.clone());
        Ok(())
    }

    async fn list_summaries(&self) -> ReconResult<Vec<ReconciliationSummary>> {
        Ok(self.summaries.read().unwrap().clone())
    }

    async fn statistics(&self) -> ReconResult<StoreStatistics> {
        let records = self.records.read().unwrap();

        Ok(StoreStatistics {
            total_records: records.len(),
            bank_records: records
                .iter()
                .filter(|r| r.source == RecordSource::BankStatement)
                .count(),
            ledger_records: records
                .iter()
                .filter(|r| r.source == RecordSource::InternalLedger)
                .count(),
            pending_records: records
                .iter()
                .filter(|r| r.status == RecordStatus::Pending)
                .count(),
            matched_records: records
                .iter()
                .filter(|r| r.status == RecordStatus::Matched)
                .count(),
            divergent_records: records
                .iter()
                .filter(|r| r.status == RecordStatus::Divergent)
                .count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn record(id: &str, source: RecordSource) -> TransactionRecord {
        TransactionRecord::new(
            id.to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            "Payment".to_string(),
            BigDecimal::from(100),
            RecordKind::Debit,
            source,
        )
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let mut storage = MemoryStorage::new();
        storage
            .insert_records(vec![record("r1", RecordSource::BankStatement)])
            .await
            .unwrap();

        let result = storage
            .insert_records(vec![record("r1", RecordSource::InternalLedger)])
            .await;
        assert!(matches!(result, Err(ReconError::Validation(_))));
    }

    #[tokio::test]
    async fn fetch_pending_preserves_insertion_order() {
        let mut storage = MemoryStorage::new();
        storage
            .insert_records(vec![
                record("r1", RecordSource::InternalLedger),
                record("r2", RecordSource::BankStatement),
                record("r3", RecordSource::InternalLedger),
            ])
            .await
            .unwrap();

        let pending = storage
            .fetch_pending(RecordSource::InternalLedger)
            .await
            .unwrap();
        let ids: Vec<&str> = pending.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
    }

    #[tokio::test]
    async fn commit_run_with_unknown_target_changes_nothing() {
        let mut storage = MemoryStorage::new();
        storage
            .insert_records(vec![record("r1", RecordSource::BankStatement)])
            .await
            .unwrap();

        let updates = vec![
            RecordUpdate {
                id: "r1".to_string(),
                status: RecordStatus::Divergent,
                linked_id: None,
            },
            RecordUpdate {
                id: "ghost".to_string(),
                status: RecordStatus::Divergent,
                linked_id: None,
            },
        ];
        let summary = crate::engine::report::build_summary(
            crate::engine::report::RunSnapshot::capture(&[], &[]),
            &crate::engine::matcher::MatchOutcome::default(),
            0,
        );

        let result = storage.commit_run(&updates, &summary).await;
        assert!(matches!(result, Err(ReconError::RecordNotFound(_))));

        // The valid update in the same batch must not have been applied
        let untouched = storage.get_record("r1").await.unwrap().unwrap();
        assert_eq!(untouched.status, RecordStatus::Pending);
        assert!(storage.list_summaries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn commit_run_rejects_non_pending_targets() {
        let mut storage = MemoryStorage::new();
        storage
            .insert_records(vec![record("r1", RecordSource::BankStatement)])
            .await
            .unwrap();

        let divergent = vec![RecordUpdate {
            id: "r1".to_string(),
            status: RecordStatus::Divergent,
            linked_id: None,
        }];
        let summary = crate::engine::report::build_summary(
            crate::engine::report::RunSnapshot::capture(&[], &[]),
            &crate::engine::matcher::MatchOutcome::default(),
            0,
        );

        storage.commit_run(&divergent, &summary).await.unwrap();

        // A second attempt to move the same record is refused
        let result = storage.commit_run(&divergent, &summary).await;
        assert!(matches!(result, Err(ReconError::Validation(_))));
    }

    #[tokio::test]
    async fn statistics_count_by_source_and_status() {
        let mut storage = MemoryStorage::new();
        storage
            .insert_records(vec![
                record("r1", RecordSource::BankStatement),
                record("r2", RecordSource::BankStatement),
                record("r3", RecordSource::InternalLedger),
            ])
            .await
            .unwrap();

        let stats = storage.statistics().await.unwrap();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.bank_records, 2);
        assert_eq!(stats.ledger_records, 1);
        assert_eq!(stats.pending_records, 3);
        assert_eq!(stats.matched_records, 0);
        assert_eq!(stats.divergent_records, 0);
    }

    #[tokio::test]
    async fn clear_removes_records_and_summaries() {
        let mut storage = MemoryStorage::new();
        storage
            .insert_records(vec![record("r1", RecordSource::BankStatement)])
            .await
            .unwrap();

        storage.clear();
        assert_eq!(
            storage
                .count_by_status(RecordStatus::Pending)
                .await
                .unwrap(),
            0
        );
    }
}
