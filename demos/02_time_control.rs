/// time control - deterministic timestamps with a test time source
use chrono::{Duration, TimeZone, Utc};
use installment_loans::{LoanLedger, Money, NewLoan, ProductCatalog, SafeTimeProvider, TimeSource, Validator};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let catalog = Arc::new(ProductCatalog::default());
    let validator = Validator::new(catalog.clone());
    let ledger = LoanLedger::with_sample_loans(catalog, &time)?;

    for month in [12, 18, 24] {
        controller.advance(Duration::days(7));
        let loan = validator.validate(NewLoan::new("Компьютер", "+998935550101", month, Money::from_major(8_000)))?;
        let stored = ledger.add(loan, &time)?;
        println!(
            "{} loan {} over {} months: {} -> {}",
            stored.created_on.format("%Y-%m-%d"),
            stored.id,
            stored.month,
            stored.price,
            stored.total_price
        );
    }

    Ok(())
}
