pub mod rules;

use std::sync::Arc;

use crate::catalog::ProductCatalog;
use crate::errors::{LoanError, Result};
use crate::loan::{NewLoan, ValidatedLoan};
use crate::types::Field;

pub use rules::{validate_month, validate_phone, validate_positive, validate_product};

/// gatekeeper for loans entering the ledger
#[derive(Debug, Clone)]
pub struct Validator {
    catalog: Arc<ProductCatalog>,
}

impl Validator {
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// run product, phone, month and price rules in order, stopping at the first failure
    pub fn validate(&self, loan: NewLoan) -> Result<ValidatedLoan> {
        let product = validate_product(&self.catalog, &loan.product)?;
        validate_phone(&loan.phone)?;
        validate_month(loan.month, Some(product))?;
        validate_positive(Field::Price, loan.price)?;

        Ok(ValidatedLoan::new(loan))
    }

    /// every violation, in rule order; empty when the loan is valid
    pub fn validate_all(&self, loan: &NewLoan) -> Vec<LoanError> {
        let mut violations = Vec::new();

        let product = match validate_product(&self.catalog, &loan.product) {
            Ok(product) => Some(product),
            Err(e) => {
                violations.push(e);
                None
            }
        };

        if let Err(e) = validate_phone(&loan.phone) {
            violations.push(e);
        }
        if let Err(e) = validate_month(loan.month, product) {
            violations.push(e);
        }
        if let Err(e) = validate_positive(Field::Price, loan.price) {
            violations.push(e);
        }

        violations
    }
}
