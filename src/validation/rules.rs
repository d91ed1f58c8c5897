use regex::Regex;
use std::sync::OnceLock;

use crate::catalog::{Product, ProductCatalog};
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::types::{Field, GLOBAL_ALLOWED_PERIODS};

// '+', optional leading country digit, then 7 to 14 digits
const E164_PATTERN: &str = r"^\+[1-9]?[0-9]{7,14}$";

fn e164() -> &'static Regex {
    static E164: OnceLock<Regex> = OnceLock::new();
    E164.get_or_init(|| Regex::new(E164_PATTERN).expect("e164 pattern compiles"))
}

/// product must name a catalog entry exactly
pub fn validate_product<'a>(catalog: &'a ProductCatalog, name: &str) -> Result<&'a Product> {
    if name.is_empty() {
        return Err(LoanError::validation(Field::Product, "product is required"));
    }

    catalog
        .lookup(name)
        .map_err(|_| LoanError::validation(Field::Product, format!("unknown product: {}", name)))
}

/// leading '+', then country code and subscriber number as digits only
pub fn validate_phone(phone: &str) -> Result<()> {
    if phone.is_empty() {
        return Err(LoanError::validation(Field::Phone, "phone is required"));
    }

    if !e164().is_match(phone) {
        return Err(LoanError::validation(
            Field::Phone,
            format!("{} is not an E.164 phone number", phone),
        ));
    }

    Ok(())
}

/// the global period set bounds every product; a product may narrow it further
pub fn validate_month(month: u32, product: Option<&Product>) -> Result<()> {
    if !GLOBAL_ALLOWED_PERIODS.contains(&month) {
        return Err(LoanError::validation(
            Field::Month,
            format!("{} is not one of {:?}", month, GLOBAL_ALLOWED_PERIODS),
        ));
    }

    if let Some(product) = product {
        if !product.permits_period(month) {
            return Err(LoanError::validation(
                Field::Month,
                format!("{} months is not offered for {}", month, product.name),
            ));
        }
    }

    Ok(())
}

/// strictly greater than zero
pub fn validate_positive(field: Field, amount: Money) -> Result<()> {
    if !amount.is_positive() {
        return Err(LoanError::validation(
            field,
            format!("must be greater than 0, got {}", amount),
        ));
    }
    Ok(())
}
