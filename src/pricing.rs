use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{PricingTerms, ProductCatalog};
use crate::decimal::Money;
use crate::errors::{LoanError, Result};

/// surcharge percentages are quoted per quarter, so every month carries a third of it
pub const PERIOD_UNIT: u32 = 3;

/// breakdown of a total repayment amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub principal: Money,
    pub surcharge: Money,
    /// months beyond the grace period
    pub surcharged_periods: u32,
    pub total: Money,
}

/// derives total repayment cost from catalog terms
#[derive(Debug, Clone)]
pub struct PricingEngine {
    catalog: Arc<ProductCatalog>,
}

impl PricingEngine {
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// total amount the borrower repays for `price` over `months`
    pub fn compute_total_price(&self, product: &str, months: u32, price: Money) -> Result<Money> {
        Ok(self.quote(product, months, price)?.total)
    }

    /// full quote; fails when the product is missing from the catalog
    pub fn quote(&self, product: &str, months: u32, price: Money) -> Result<PriceQuote> {
        let product = self.catalog.lookup(product)?;

        let quote = match &product.pricing {
            Some(terms) => quote_with_terms(terms, months, price)?,
            None => flat_quote(price),
        };

        tracing::debug!(
            product = %product.name,
            months,
            %price,
            total = %quote.total,
            "priced loan"
        );

        Ok(quote)
    }
}

/// price + price * (excess months * percent) / (100 * PERIOD_UNIT)
pub fn quote_with_terms(terms: &PricingTerms, months: u32, price: Money) -> Result<PriceQuote> {
    if months <= terms.grace_period_months {
        return Ok(flat_quote(price));
    }

    let out_of_range = || LoanError::PriceOutOfRange { price, months };

    let surcharged_periods = months - terms.grace_period_months;
    let percent = surcharged_periods
        .checked_mul(terms.surcharge_percent_per_period)
        .ok_or_else(out_of_range)?;
    let surcharge = price
        .checked_fraction(percent, 100 * PERIOD_UNIT)
        .ok_or_else(out_of_range)?;
    let total = price.checked_add(surcharge).ok_or_else(out_of_range)?;

    Ok(PriceQuote {
        principal: price,
        surcharge,
        surcharged_periods,
        total,
    })
}

fn flat_quote(price: Money) -> PriceQuote {
    PriceQuote {
        principal: price,
        surcharge: Money::ZERO,
        surcharged_periods: 0,
        total: price,
    }
}
