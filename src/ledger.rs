use hourglass_rs::{SafeTimeProvider, TimeSource};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::ProductCatalog;
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::loan::{Loan, NewLoan, ValidatedLoan};
use crate::pricing::PricingEngine;
use crate::transaction::{NewTransaction, Transaction};
use crate::types::{Field, LoanId, TransactionId};
use crate::validation::{validate_positive, Validator};

#[derive(Debug, Default)]
struct LedgerState {
    loans: Vec<Loan>,
    transactions: Vec<Transaction>,
}

impl LedgerState {
    fn next_loan_id(&self) -> LoanId {
        self.loans.last().map_or(1, |loan| loan.id + 1)
    }

    fn next_transaction_id(&self) -> TransactionId {
        self.transactions.last().map_or(1, |tx| tx.id + 1)
    }

    fn find_loan(&self, id: LoanId) -> Option<&Loan> {
        // ids are dense and ascending, so a binary search is enough
        self.loans
            .binary_search_by_key(&id, |loan| loan.id)
            .ok()
            .map(|idx| &self.loans[idx])
    }
}

/// in-memory, append-only store of loans and their repayments
///
/// A single lock guards both sequences. Writers hold it across id assignment
/// and append, so two concurrent adds can never hand out the same id and a
/// reader never sees a half-written record.
#[derive(Debug)]
pub struct LoanLedger {
    pricing: PricingEngine,
    state: RwLock<LedgerState>,
}

impl LoanLedger {
    /// create an empty ledger priced against `catalog`
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self {
            pricing: PricingEngine::new(catalog),
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// create a ledger holding the two demo smartphone loans
    pub fn with_sample_loans(catalog: Arc<ProductCatalog>, time_provider: &SafeTimeProvider) -> Result<Self> {
        let validator = Validator::new(catalog.clone());
        let ledger = Self::new(catalog);

        for loan in sample_loans() {
            ledger.add(validator.validate(loan)?, time_provider)?;
        }

        Ok(ledger)
    }

    pub fn pricing(&self) -> &PricingEngine {
        &self.pricing
    }

    /// add a validated loan with system time
    pub fn add_now(&self, loan: ValidatedLoan) -> Result<Loan> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.add(loan, &time)
    }

    /// price, number and append a validated loan
    pub fn add(&self, loan: ValidatedLoan, time_provider: &SafeTimeProvider) -> Result<Loan> {
        // pricing happens before the lock so a catalog fault leaves the store untouched
        let total_price = self
            .pricing
            .compute_total_price(loan.product(), loan.month(), loan.price())
            .map_err(|e| {
                tracing::error!(product = loan.product(), error = %e, "loan references a product the ledger cannot price");
                e
            })?;

        let NewLoan { product, phone, month, price } = loan.into_inner();
        let now = time_provider.now();

        let mut state = self.write();
        let stored = Loan {
            id: state.next_loan_id(),
            product,
            phone,
            month,
            price,
            total_price,
            created_on: now,
            updated_on: now,
        };
        state.loans.push(stored.clone());
        drop(state);

        tracing::info!(
            loan_id = stored.id,
            product = %stored.product,
            month = stored.month,
            total_price = %stored.total_price,
            "loan recorded"
        );

        Ok(stored)
    }

    /// every stored loan in insertion order
    pub fn list(&self) -> Vec<Loan> {
        self.read().loans.clone()
    }

    /// look a loan up by id
    pub fn get(&self, id: LoanId) -> Result<Loan> {
        self.read()
            .find_loan(id)
            .cloned()
            .ok_or(LoanError::LoanNotFound { id })
    }

    pub fn len(&self) -> usize {
        self.read().loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().loans.is_empty()
    }

    /// record a repayment with system time
    pub fn record_transaction_now(&self, transaction: NewTransaction) -> Result<Transaction> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.record_transaction(transaction, &time)
    }

    /// record a repayment against an existing loan
    pub fn record_transaction(
        &self,
        transaction: NewTransaction,
        time_provider: &SafeTimeProvider,
    ) -> Result<Transaction> {
        validate_positive(Field::Amount, transaction.amount)?;

        let now = time_provider.now();
        let mut state = self.write();

        if state.find_loan(transaction.loan_id).is_none() {
            return Err(LoanError::LoanNotFound { id: transaction.loan_id });
        }

        let stored = Transaction {
            id: state.next_transaction_id(),
            loan_id: transaction.loan_id,
            amount: transaction.amount,
            created_on: now,
            updated_on: now,
        };
        state.transactions.push(stored.clone());
        drop(state);

        tracing::info!(
            transaction_id = stored.id,
            loan_id = stored.loan_id,
            amount = %stored.amount,
            "transaction recorded"
        );

        Ok(stored)
    }

    /// every stored transaction in insertion order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.read().transactions.clone()
    }

    /// transactions recorded against one loan
    pub fn transactions_for(&self, loan_id: LoanId) -> Vec<Transaction> {
        self.read()
            .transactions
            .iter()
            .filter(|tx| tx.loan_id == loan_id)
            .cloned()
            .collect()
    }

    // records are only ever appended whole, so a poisoned lock still guards consistent data
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// the smartphone loans the service boots with
pub fn sample_loans() -> Vec<NewLoan> {
    vec![
        NewLoan::new("Смартфон", "+998995881375", 3, Money::from_major(1_000)),
        NewLoan::new("Смартфон", "+998995881375", 24, Money::from_major(1_000)),
    ]
}
