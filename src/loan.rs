use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::LoanId;

/// candidate loan as submitted by a caller
///
/// Missing keys fall back to empty values so the validator, not the parser,
/// reports which field is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewLoan {
    pub product: String,
    pub phone: String,
    pub month: u32,
    pub price: Money,
}

impl NewLoan {
    pub fn new(product: impl Into<String>, phone: impl Into<String>, month: u32, price: Money) -> Self {
        Self {
            product: product.into(),
            phone: phone.into(),
            month,
            price,
        }
    }
}

/// a candidate loan that passed every validation rule
///
/// Only the validator constructs this, which is what lets the ledger skip
/// its own checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLoan(NewLoan);

impl ValidatedLoan {
    pub(crate) fn new(loan: NewLoan) -> Self {
        ValidatedLoan(loan)
    }

    pub fn product(&self) -> &str {
        &self.0.product
    }

    pub fn phone(&self) -> &str {
        &self.0.phone
    }

    pub fn month(&self) -> u32 {
        self.0.month
    }

    pub fn price(&self) -> Money {
        self.0.price
    }

    pub fn into_inner(self) -> NewLoan {
        self.0
    }
}

impl AsRef<NewLoan> for ValidatedLoan {
    fn as_ref(&self) -> &NewLoan {
        &self.0
    }
}

/// stored loan record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub product: String,
    pub phone: String,
    pub month: u32,
    pub price: Money,
    pub total_price: Money,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl Loan {
    /// amount charged on top of the financed price
    pub fn surcharge(&self) -> Money {
        self.total_price - self.price
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
