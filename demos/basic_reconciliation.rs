//! Basic reconciliation usage example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::{
    MemoryStorage, ReconciliationStore, Reconciler, RecordFilter, RecordKind, RecordSource,
    RecordStatus, TransactionRecord,
};

fn record(
    id: &str,
    day: u32,
    description: &str,
    amount: &str,
    kind: RecordKind,
    source: RecordSource,
) -> TransactionRecord {
    TransactionRecord::new(
        id.to_string(),
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        description.to_string(),
        amount.parse::<BigDecimal>().unwrap(),
        kind,
        source,
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("🏦 Reconciliation Core - Basic Example\n");

    let mut storage = MemoryStorage::new();

    // 1. Seed one statement batch and one ledger batch
    println!("📥 Loading pending transactions...");
    use RecordKind::{Credit, Debit};
    use RecordSource::{BankStatement, InternalLedger};

    let count = storage
        .insert_records(vec![
            record("b1", 15, "Payment Vendor ABC", "1500.00", Debit, BankStatement),
            record("b2", 16, "Customer Receipt XYZ", "2300.50", Credit, BankStatement),
            record("b3", 17, "Bank Fee", "25.00", Debit, BankStatement),
            record("b4", 18, "Transfer Received", "800.00", Credit, BankStatement),
            record("b5", 19, "Salary Payment", "5000.00", Debit, BankStatement),
            record("l1", 15, "Payment Vendor ABC Ltd", "1500.00", Debit, InternalLedger),
            record("l2", 16, "Customer Receipt XYZ Corp", "2300.50", Credit, InternalLedger),
            record("l3", 18, "Transfer Received", "800.00", Credit, InternalLedger),
            record("l4", 19, "Payroll", "5000.00", Debit, InternalLedger),
            record("l5", 20, "Product Sale DEF", "1200.00", Credit, InternalLedger),
        ])
        .await?;
    println!("  ✓ Inserted {count} pending records\n");

    // 2. Run the reconciliation
    println!("⚖️  Running reconciliation...");
    let mut reconciler = Reconciler::new(storage.clone());
    let summary = reconciler.run().await?;

    println!("  ✓ {}", summary.notes);
    println!("  ✓ Bank total:       {}", summary.bank_total_amount);
    println!("  ✓ Ledger total:     {}", summary.ledger_total_amount);
    println!("  ✓ Difference:       {}\n", summary.amount_difference);

    // 3. Inspect the matched pairs
    println!("🔗 Matched pairs:");
    let matched = storage
        .list_records(RecordFilter {
            source: Some(BankStatement),
            status: Some(RecordStatus::Matched),
        })
        .await?;
    for rec in matched {
        let partner_id = rec.linked_id.as_deref().unwrap_or("?");
        println!("  {} \"{}\" ↔ {}", rec.id, rec.description, partner_id);
    }
    println!();

    // 4. Inspect what needs manual review
    println!("⚠️  Divergent records:");
    let divergent = storage
        .list_records(RecordFilter {
            source: None,
            status: Some(RecordStatus::Divergent),
        })
        .await?;
    for rec in divergent {
        println!(
            "  {} [{}] \"{}\" {}",
            rec.id,
            rec.source.as_str(),
            rec.description,
            rec.amount
        );
    }
    println!();

    // 5. Store-wide statistics
    let stats = reconciler.statistics().await?;
    println!("📊 Store statistics:");
    println!("  Total records:   {}", stats.total_records);
    println!("  Matched:         {}", stats.matched_records);
    println!("  Divergent:       {}", stats.divergent_records);
    println!("  Still pending:   {}", stats.pending_records);

    Ok(())
}
