/// quick start - minimal example to get started
use installment_loans::{LoanService, Money, NewLoan, Product, ProductCatalog};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ProductCatalog::new(vec![Product::priced("Phone", 9, 3)])?;
    let service = LoanService::new(Arc::new(catalog));

    // 9 months are inside the grace period, 24 are surcharged
    let short = service.submit_now(NewLoan::new("Phone", "+15551234567", 9, Money::from_major(1_000)))?;
    let long = service.submit_now(NewLoan::new("Phone", "+15551234567", 24, Money::from_major(1_000)))?;

    println!("loan {}: total {}", short.id, short.total_price);
    println!("loan {}: total {}", long.id, long.total_price);

    // rejected loans never reach the ledger
    if let Err(e) = service.submit_now(NewLoan::new("Tablet", "+15551234567", 12, Money::from_major(500))) {
        println!("rejected: {}", e);
    }

    println!("{}", service.list_json()?);

    Ok(())
}
