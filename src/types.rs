//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Direction of a financial transaction
///
/// The amount field always carries a non-negative magnitude; the sign of the
/// underlying movement is factored out into this kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Money leaving the account
    Debit,
    /// Money entering the account
    Credit,
}

impl RecordKind {
    /// Parse a kind from its wire label (`"debit"` / `"credit"`)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "debit" => Some(RecordKind::Debit),
            "credit" => Some(RecordKind::Credit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Debit => "debit",
            RecordKind::Credit => "credit",
        }
    }
}

/// Which side of the reconciliation a record belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Imported from the bank statement
    BankStatement,
    /// Recorded in the internal ledger
    InternalLedger,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::BankStatement => "bank_statement",
            RecordSource::InternalLedger => "internal_ledger",
        }
    }
}

/// Reconciliation state of a single record
///
/// Records start as `Pending`. A reconciliation run moves every record in its
/// working sets to exactly one of the two terminal states; neither terminal
/// state is ever left again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Not yet considered by any run
    Pending,
    /// Paired with a record from the other source
    Matched,
    /// Considered but left without an acceptable counterpart
    Divergent,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Matched => "matched",
            RecordStatus::Divergent => "divergent",
        }
    }
}

/// One financial event from either the bank statement or the internal ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier, opaque to the engine
    pub id: String,
    /// When the event occurred; matching only looks at the calendar day
    pub date: NaiveDateTime,
    /// Free-text label
    pub description: String,
    /// Non-negative monetary magnitude
    pub amount: BigDecimal,
    /// Debit or credit
    pub kind: RecordKind,
    /// Optional free-text tag, not used by matching
    pub category: Option<String>,
    /// Which side of the reconciliation this record belongs to
    pub source: RecordSource,
    /// Optional external reference, not used by matching
    pub document_ref: Option<String>,
    /// Current reconciliation state
    pub status: RecordStatus,
    /// Id of the paired record; only meaningful while `status` is `Matched`
    pub linked_id: Option<String>,
    /// When the record was created
    pub created_at: NaiveDateTime,
}

impl TransactionRecord {
    /// Create a new pending record
    pub fn new(
        id: String,
        date: NaiveDateTime,
        description: String,
        amount: BigDecimal,
        kind: RecordKind,
        source: RecordSource,
    ) -> Self {
        Self {
            id,
            date,
            description,
            amount,
            kind,
            category: None,
            source,
            document_ref: None,
            status: RecordStatus::Pending,
            linked_id: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Attach a category tag
    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    /// Attach an external document reference
    pub fn with_document_ref(mut self, document_ref: String) -> Self {
        self.document_ref = Some(document_ref);
        self
    }
}

/// One status mutation produced by a reconciliation run
///
/// Runs never write records directly; they emit a batch of updates so the
/// storage layer can apply them together with the run summary in a single
/// transactional step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    /// Record being updated
    pub id: String,
    /// New terminal status
    pub status: RecordStatus,
    /// Paired record id when `status` is `Matched`
    pub linked_id: Option<String>,
}

/// Outcome of a single reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// When the run was executed
    pub processed_at: NaiveDateTime,
    /// Pending bank-side records considered, counted before any mutation
    pub bank_count: usize,
    /// Pending ledger-side records considered, counted before any mutation
    pub ledger_count: usize,
    /// Pairs committed during the run
    pub matched_count: usize,
    /// Records from both sides left without a counterpart
    pub divergent_count: usize,
    /// Records still pending across the whole store after the run
    pub pending_count_after: usize,
    /// Sum of bank-side working-set amounts
    pub bank_total_amount: BigDecimal,
    /// Sum of ledger-side working-set amounts
    pub ledger_total_amount: BigDecimal,
    /// `bank_total_amount - ledger_total_amount`, signed
    pub amount_difference: BigDecimal,
    /// Generated human-readable description of the run
    pub notes: String,
}

/// Store-wide record counts by source and status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_records: usize,
    pub bank_records: usize,
    pub ledger_records: usize,
    pub pending_records: usize,
    pub matched_records: usize,
    pub divergent_records: usize,
}

/// Errors that can occur in the reconciliation system
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Record not found: {0}")]
    RecordNotFound(String),
    #[error("Import error: {0}")]
    Import(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for reconciliation operations
pub type ReconResult<T> = Result<T, ReconError>;
