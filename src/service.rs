use hourglass_rs::{SafeTimeProvider, TimeSource};
use std::sync::Arc;

use crate::catalog::ProductCatalog;
use crate::config::LedgerConfig;
use crate::errors::{LoanError, Result};
use crate::ledger::LoanLedger;
use crate::loan::{Loan, NewLoan};
use crate::transaction::{NewTransaction, Transaction};
use crate::validation::Validator;

/// validator and ledger wired together for a transport layer to call into
#[derive(Debug)]
pub struct LoanService {
    validator: Validator,
    ledger: LoanLedger,
}

impl LoanService {
    /// empty service over `catalog`
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self {
            validator: Validator::new(catalog.clone()),
            ledger: LoanLedger::new(catalog),
        }
    }

    pub fn from_config(config: &LedgerConfig, time_provider: &SafeTimeProvider) -> Result<Self> {
        let catalog = config.catalog()?;
        let ledger = if config.seed_sample_loans {
            LoanLedger::with_sample_loans(catalog.clone(), time_provider)?
        } else {
            LoanLedger::new(catalog.clone())
        };

        tracing::info!(
            products = catalog.len(),
            loans = ledger.len(),
            "loan service ready"
        );

        Ok(Self {
            validator: Validator::new(catalog),
            ledger,
        })
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn ledger(&self) -> &LoanLedger {
        &self.ledger
    }

    /// validate then store; rejected loans never reach the ledger
    pub fn submit(&self, loan: NewLoan, time_provider: &SafeTimeProvider) -> Result<Loan> {
        let validated = self.validator.validate(loan).map_err(|e| {
            tracing::warn!(error = %e, "loan rejected");
            e
        })?;
        self.ledger.add(validated, time_provider)
    }

    pub fn submit_now(&self, loan: NewLoan) -> Result<Loan> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.submit(loan, &time)
    }

    /// json in, stored loan as json out
    pub fn submit_json(&self, body: &str, time_provider: &SafeTimeProvider) -> Result<String> {
        let loan: NewLoan = parse_payload(body)?;
        let stored = self.submit(loan, time_provider)?;
        Ok(serde_json::to_string(&stored)?)
    }

    /// every stored loan as a json array
    pub fn list_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.ledger.list())?)
    }

    pub fn record_transaction(
        &self,
        transaction: NewTransaction,
        time_provider: &SafeTimeProvider,
    ) -> Result<Transaction> {
        self.ledger
            .record_transaction(transaction, time_provider)
            .map_err(|e| {
                tracing::warn!(error = %e, "transaction rejected");
                e
            })
    }

    pub fn record_transaction_json(&self, body: &str, time_provider: &SafeTimeProvider) -> Result<String> {
        let transaction: NewTransaction = parse_payload(body)?;
        let stored = self.record_transaction(transaction, time_provider)?;
        Ok(serde_json::to_string(&stored)?)
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "unreadable payload");
        LoanError::MalformedPayload {
            message: e.to_string(),
        }
    })
}
