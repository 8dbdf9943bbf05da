//! CSV import and reconciliation example

use reconciliation_core::{MemoryStorage, Reconciler, RecordSource, StatementImporter};

const BANK_CSV: &str = "\
date,description,amount,kind,category,document
15/01/2024,Payment Vendor ABC,1500.00,debit,suppliers,INV-100
16/01/2024,Customer Receipt XYZ,2300.50,credit,sales,
17/01/2024,Bank Fee,25.00,debit,fees,
18/01/2024,Transfer Received,800.00,credit,,
";

const LEDGER_CSV: &str = "\
date,description,amount,kind,category,document
2024-01-15,Payment Vendor ABC Ltd,1500.00,debit,suppliers,
2024-01-16,Customer Receipt XYZ Corp,2300.50,credit,sales,
2024-01-18,Transfer Received,800.00,credit,,
2024-01-20,Product Sale DEF,1200.00,credit,sales,
not-a-date,Broken export row,10.00,debit,,
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("📄 Reconciliation Core - CSV Import Example\n");

    let mut storage = MemoryStorage::new();
    let importer = StatementImporter::new();

    let bank = importer
        .import(&mut storage, BANK_CSV, RecordSource::BankStatement)
        .await?;
    println!(
        "  ✓ Bank statement: {} imported, {} skipped",
        bank.imported, bank.skipped
    );

    let ledger = importer
        .import(&mut storage, LEDGER_CSV, RecordSource::InternalLedger)
        .await?;
    println!(
        "  ✓ Internal ledger: {} imported, {} skipped\n",
        ledger.imported, ledger.skipped
    );

    let mut reconciler = Reconciler::new(storage);
    let summary = reconciler.run().await?;

    println!("⚖️  {}", summary.notes);
    println!("  Bank side:   {} records, total {}", summary.bank_count, summary.bank_total_amount);
    println!(
        "  Ledger side: {} records, total {}",
        summary.ledger_count, summary.ledger_total_amount
    );
    println!("  Difference:  {}", summary.amount_difference);

    Ok(())
}
