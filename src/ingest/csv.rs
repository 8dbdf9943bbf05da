//! CSV statement import
//!
//! Parses exported statement files into pending [`TransactionRecord`]s.
//! Expected columns: `date`, `description`, `amount`, and optionally `kind`,
//! `category`, `document`. Rows that cannot be parsed or fail validation are
//! skipped and counted, never fatal. The engine downstream assumes it only
//! ever sees well-formed records.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;

use crate::traits::{DefaultRecordValidator, ReconciliationStore, RecordValidator};
use crate::types::*;

/// One raw CSV row before normalization
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    description: String,
    #[serde(default)]
    amount: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    document: String,
}

/// Result of one import: how many rows became records, how many were skipped
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Parses CSV statement content into pending transaction records
///
/// Record ids are minted as v4 UUIDs at parse time; storage treats them as
/// opaque keys.
pub struct StatementImporter {
    validator: Box<dyn RecordValidator>,
}

impl Default for StatementImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementImporter {
    /// Create an importer with the default record validator
    pub fn new() -> Self {
        Self {
            validator: Box::new(DefaultRecordValidator),
        }
    }

    /// Create an importer with a custom record validator
    pub fn with_validator(validator: Box<dyn RecordValidator>) -> Self {
        Self { validator }
    }

    /// Parse CSV content into records tagged with the given source
    ///
    /// Returns the parsed records and the number of skipped rows. Bad rows
    /// are never fatal; they are logged and counted.
    pub fn parse(
        &self,
        content: &str,
        source: RecordSource,
    ) -> ReconResult<(Vec<TransactionRecord>, usize)> {
        let mut reader = ::csv::Reader::from_reader(content.as_bytes());
        let mut records = Vec::new();
        let mut skipped = 0;

        for (row_number, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    tracing::warn!(row = row_number + 1, %err, "skipping unreadable CSV row");
                    skipped += 1;
                    continue;
                }
            };

            match self.record_from_row(row, &source) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(row = row_number + 1, %err, "skipping invalid CSV row");
                    skipped += 1;
                }
            }
        }

        Ok((records, skipped))
    }

    /// Parse CSV content and insert the resulting records into the store
    pub async fn import<S: ReconciliationStore>(
        &self,
        store: &mut S,
        content: &str,
        source: RecordSource,
    ) -> ReconResult<ImportReport> {
        let (records, skipped) = self.parse(content, source)?;
        let imported = store.insert_records(records).await?;
        Ok(ImportReport { imported, skipped })
    }

    fn record_from_row(&self, row: CsvRow, source: &RecordSource) -> ReconResult<TransactionRecord> {
        let date = parse_date(&row.date)?;
        let raw_amount = parse_amount(&row.amount)?;

        // An absent kind is inferred from the amount's sign; the stored
        // magnitude is always non-negative
        let (amount, kind) = match RecordKind::from_label(&row.kind) {
            Some(kind) => (raw_amount, kind),
            None if row.kind.trim().is_empty() => {
                let kind = if raw_amount < BigDecimal::from(0) {
                    RecordKind::Debit
                } else {
                    RecordKind::Credit
                };
                (raw_amount.abs(), kind)
            }
            None => {
                return Err(ReconError::Import(format!(
                    "unknown transaction kind '{}'",
                    row.kind
                )));
            }
        };

        let mut record = TransactionRecord::new(
            Uuid::new_v4().to_string(),
            date,
            row.description.trim().to_string(),
            amount,
            kind,
            source.clone(),
        );

        let category = row.category.trim();
        if !category.is_empty() {
            record = record.with_category(category.to_string());
        }
        let document = row.document.trim();
        if !document.is_empty() {
            record = record.with_document_ref(document.to_string());
        }

        self.validator.validate_record(&record)?;
        Ok(record)
    }
}

/// Accepts `dd/mm/yyyy` or ISO `yyyy-mm-dd`, normalized to midnight
fn parse_date(value: &str) -> ReconResult<NaiveDateTime> {
    let value = value.trim();
    let format = if value.contains('/') {
        "%d/%m/%Y"
    } else {
        "%Y-%m-%d"
    };

    NaiveDate::parse_from_str(value, format)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|err| ReconError::Import(format!("invalid date '{value}': {err}")))
}

/// Accepts plain decimals plus a currency prefix and comma decimal separator
fn parse_amount(value: &str) -> ReconResult<BigDecimal> {
    let cleaned = value
        .trim()
        .trim_start_matches("R$")
        .trim_start_matches('$')
        .trim()
        .replace(',', ".");

    cleaned
        .parse::<BigDecimal>()
        .map_err(|err| ReconError::Import(format!("invalid amount '{value}': {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    const STATEMENT: &str = "\
date,description,amount,kind,category,document
15/01/2024,Payment Vendor ABC,1500.00,debit,suppliers,INV-100
2024-01-16,Customer receipt XYZ,2300.50,credit,,
17/01/2024,Bank fee,-25.00,,,
";

    #[test]
    fn parses_both_date_formats_and_infers_kind() {
        let importer = StatementImporter::new();
        let (records, skipped) = importer
            .parse(STATEMENT, RecordSource::BankStatement)
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(skipped, 0);

        assert_eq!(records[0].date.date().to_string(), "2024-01-15");
        assert_eq!(records[0].kind, RecordKind::Debit);
        assert_eq!(records[0].category.as_deref(), Some("suppliers"));
        assert_eq!(records[0].document_ref.as_deref(), Some("INV-100"));

        assert_eq!(records[1].date.date().to_string(), "2024-01-16");
        assert_eq!(records[1].kind, RecordKind::Credit);
        assert_eq!(records[1].category, None);

        // Negative amount with no kind column: debit, magnitude stored
        assert_eq!(records[2].kind, RecordKind::Debit);
        assert_eq!(records[2].amount, "25.00".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn records_start_pending_with_unique_ids() {
        let importer = StatementImporter::new();
        let (records, _) = importer
            .parse(STATEMENT, RecordSource::InternalLedger)
            .unwrap();

        assert!(records
            .iter()
            .all(|r| r.status == RecordStatus::Pending && r.linked_id.is_none()));
        assert!(records
            .iter()
            .all(|r| r.source == RecordSource::InternalLedger));

        let mut ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn currency_prefix_and_comma_decimals_are_accepted() {
        let content = "\
date,description,amount,kind
15/01/2024,Taxa mensal,\"R$ 25,00\",debit
";
        let importer = StatementImporter::new();
        let (records, skipped) = importer.parse(content, RecordSource::BankStatement).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(records[0].amount, "25.00".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn bad_rows_are_skipped_not_fatal() {
        let content = "\
date,description,amount,kind
not-a-date,Broken row,100.00,debit
15/01/2024,Valid row,100.00,debit
15/01/2024,Bad amount,abc,debit
15/01/2024,Bad kind,100.00,transfer
";
        let importer = StatementImporter::new();
        let (records, skipped) = importer.parse(content, RecordSource::BankStatement).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Valid row");
        assert_eq!(skipped, 3);
    }

    #[tokio::test]
    async fn import_inserts_into_store() {
        let mut storage = MemoryStorage::new();
        let importer = StatementImporter::new();

        let report = importer
            .import(&mut storage, STATEMENT, RecordSource::BankStatement)
            .await
            .unwrap();

        assert_eq!(report, ImportReport { imported: 3, skipped: 0 });
        assert_eq!(
            storage.count_by_status(RecordStatus::Pending).await.unwrap(),
            3
        );
    }
}
