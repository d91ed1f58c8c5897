use serde::{Deserialize, Serialize};
use std::fmt;

/// ledger-assigned loan identifier, starts at 1
pub type LoanId = u64;

/// ledger-assigned transaction identifier, starts at 1
pub type TransactionId = u64;

/// installment periods any product may be financed over
pub const GLOBAL_ALLOWED_PERIODS: [u32; 6] = [3, 6, 9, 12, 18, 24];

/// input field a validation rule guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Product,
    Phone,
    Month,
    Price,
    Amount,
    #[serde(rename = "loanID")]
    LoanId,
}

impl Field {
    /// name as it appears in json payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Product => "product",
            Field::Phone => "phone",
            Field::Month => "month",
            Field::Price => "price",
            Field::Amount => "amount",
            Field::LoanId => "loanID",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_match_payload_keys() {
        assert_eq!(Field::Product.to_string(), "product");
        assert_eq!(Field::LoanId.to_string(), "loanID");
        assert_eq!(serde_json::to_string(&Field::LoanId).unwrap(), "\"loanID\"");
        assert_eq!(serde_json::to_string(&Field::Month).unwrap(), "\"month\"");
    }
}
