pub mod catalog;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod ledger;
pub mod loan;
pub mod logging;
pub mod pricing;
pub mod service;
pub mod transaction;
pub mod types;
pub mod validation;

// re-export key types
pub use catalog::{PricingTerms, Product, ProductCatalog};
pub use config::{LedgerConfig, LoggingConfig};
pub use decimal::Money;
pub use errors::{ErrorClass, LoanError, Result};
pub use ledger::LoanLedger;
pub use loan::{Loan, NewLoan, ValidatedLoan};
pub use pricing::{PriceQuote, PricingEngine, PERIOD_UNIT};
pub use service::LoanService;
pub use transaction::{NewTransaction, Transaction};
pub use types::{Field, LoanId, TransactionId, GLOBAL_ALLOWED_PERIODS};
pub use validation::Validator;

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
