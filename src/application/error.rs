use thiserror::Error;

use crate::domain::{Cents, ParseCentsError};

/// Why a candidate transaction was rejected. Nothing is recorded when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown type '{0}' (expected Income or Expense)")]
    UnknownKind(String),

    #[error(
        "Unknown category '{0}' (expected Salary, Business, Food, Rent, Entertainment or Other)"
    )]
    UnknownCategory(String),

    #[error("Invalid amount '{input}': {source}")]
    InvalidAmount {
        input: String,
        source: ParseCentsError,
    },

    #[error("Amount must not be negative: {0} cents")]
    NegativeAmount(Cents),

    #[error("Amount {0} cents would overflow the ledger totals")]
    AmountTooLarge(Cents),
}
