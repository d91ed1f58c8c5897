use thiserror::Error;

use crate::decimal::Money;
use crate::types::{Field, LoanId};

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("validation failed on {field}: {reason}")]
    Validation {
        field: Field,
        reason: String,
    },

    #[error("product not found: {name}")]
    ProductNotFound {
        name: String,
    },

    #[error("price out of range: {price} over {months} months cannot be priced")]
    PriceOutOfRange {
        price: Money,
        months: u32,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("malformed payload: {message}")]
    MalformedPayload {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// coarse grouping a transport layer maps onto response status classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// caller sent bad input; resubmitting corrected input succeeds
    ClientInput,
    /// a referenced record does not exist
    NotFound,
    /// catalog or configuration inconsistency, never the caller's fault
    Internal,
}

impl LoanError {
    pub(crate) fn validation(field: Field, reason: impl Into<String>) -> Self {
        LoanError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            LoanError::Validation { .. }
            | LoanError::PriceOutOfRange { .. }
            | LoanError::MalformedPayload { .. } => ErrorClass::ClientInput,
            LoanError::LoanNotFound { .. } => ErrorClass::NotFound,
            LoanError::ProductNotFound { .. }
            | LoanError::InvalidConfiguration { .. }
            | LoanError::Serialization(_) => ErrorClass::Internal,
        }
    }

    /// offending field for validation failures
    pub fn field(&self) -> Option<Field> {
        match self {
            LoanError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let invalid = LoanError::validation(Field::Phone, "not e164");
        assert_eq!(invalid.class(), ErrorClass::ClientInput);
        assert_eq!(invalid.field(), Some(Field::Phone));
        assert_eq!(invalid.to_string(), "validation failed on phone: not e164");

        let missing = LoanError::ProductNotFound { name: "Tablet".to_string() };
        assert_eq!(missing.class(), ErrorClass::Internal);
        assert_eq!(missing.field(), None);

        assert_eq!(LoanError::LoanNotFound { id: 7 }.class(), ErrorClass::NotFound);

        let too_big = LoanError::PriceOutOfRange { price: Money::from_major(1), months: 24 };
        assert_eq!(too_big.class(), ErrorClass::ClientInput);
    }
}
