use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, TransactionId};

/// repayment as submitted by a caller
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTransaction {
    #[serde(rename = "loanID")]
    pub loan_id: LoanId,
    pub amount: Money,
}

impl NewTransaction {
    pub fn new(loan_id: LoanId, amount: Money) -> Self {
        Self { loan_id, amount }
    }
}

/// stored repayment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "loanID")]
    pub loan_id: LoanId,
    pub amount: Money,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_payload_keys() {
        let tx: NewTransaction = serde_json::from_str(r#"{"loanID": 2, "amount": 150.5}"#).unwrap();
        assert_eq!(tx.loan_id, 2);
        assert_eq!(tx.amount, Money::from_str_exact("150.5").unwrap());
    }
}
