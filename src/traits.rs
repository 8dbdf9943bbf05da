//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Optional criteria for listing records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Restrict to one side of the reconciliation
    pub source: Option<RecordSource>,
    /// Restrict to one reconciliation status
    pub status: Option<RecordStatus>,
}

impl RecordFilter {
    /// Whether a record satisfies the filter
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.source.as_ref().is_none_or(|s| &record.source == s)
            && self.status.as_ref().is_none_or(|s| &record.status == s)
    }
}

/// Storage abstraction for transaction records and run summaries
///
/// This trait allows the reconciliation engine to work with any storage
/// backend (PostgreSQL, SQLite, in-memory, etc.) by implementing these
/// methods. Reads must return stable snapshots for the duration of one
/// reconciliation run.
#[async_trait]
pub trait ReconciliationStore: Send + Sync {
    /// Insert a batch of records, typically freshly ingested ones
    ///
    /// Returns the number of records inserted. Ids must be unique across the
    /// store.
    async fn insert_records(&mut self, records: Vec<TransactionRecord>) -> ReconResult<usize>;

    /// Get a record by id
    async fn get_record(&self, record_id: &str) -> ReconResult<Option<TransactionRecord>>;

    /// List records matching the filter
    async fn list_records(&self, filter: RecordFilter) -> ReconResult<Vec<TransactionRecord>>;

    /// Fetch all pending records for one source, in insertion order
    ///
    /// The returned order defines the working-set iteration order for a run,
    /// and with it the first-seen tie-break between equally scored
    /// candidates.
    async fn fetch_pending(&self, source: RecordSource) -> ReconResult<Vec<TransactionRecord>>;

    /// Count records currently in the given status, across the whole store
    async fn count_by_status(&self, status: RecordStatus) -> ReconResult<usize>;

    /// Apply a run's status updates and append its summary as one unit
    ///
    /// Either every update and the summary take effect, or none do. This is
    /// the only write path a reconciliation run uses.
    async fn commit_run(
        &mut self,
        updates: &[RecordUpdate],
        summary: &ReconciliationSummary,
    ) -> ReconResult<()>;

    /// List all run summaries, oldest first
    async fn list_summaries(&self) -> ReconResult<Vec<ReconciliationSummary>>;

    /// Compute store-wide record counts by source and status
    async fn statistics(&self) -> ReconResult<StoreStatistics>;
}

/// Trait for implementing custom record validation rules
///
/// Validation happens at ingestion, before records reach the matcher; the
/// engine itself assumes well-formed records.
pub trait RecordValidator: Send + Sync {
    /// Validate a record before it is handed to storage
    fn validate_record(&self, record: &TransactionRecord) -> ReconResult<()>;
}

/// Default record validator with basic rules
pub struct DefaultRecordValidator;

impl RecordValidator for DefaultRecordValidator {
    fn validate_record(&self, record: &TransactionRecord) -> ReconResult<()> {
        if record.id.trim().is_empty() {
            return Err(ReconError::Validation(
                "Record ID cannot be empty".to_string(),
            ));
        }

        if record.amount < bigdecimal::BigDecimal::from(0) {
            return Err(ReconError::Validation(
                "Record amount cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}
