use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money coming in (salary, business revenue)
    Income,
    /// Money going out
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Salary,
    Business,
    Food,
    Rent,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Salary,
        Category::Business,
        Category::Food,
        Category::Rent,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Business => "Business",
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by the `FromStr` impls; carries the rejected text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);

/// A single recorded income or expense.
/// Only `LedgerStore` creates transactions, and it never hands out `&mut`,
/// so a transaction cannot be changed or built with a negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    date: NaiveDate,
    kind: TransactionKind,
    category: Category,
    amount_cents: Cents,
}

impl Transaction {
    /// Build a transaction from already-validated parts.
    /// `LedgerStore::record` rejects negative amounts before calling this.
    pub(crate) fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: Category,
        amount_cents: Cents,
    ) -> Self {
        assert!(amount_cents >= 0, "Transaction amount must not be negative");
        Self {
            date,
            kind,
            category,
            amount_cents,
        }
    }

    /// Calendar day the money moved
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Amount in cents, never negative
    pub fn amount_cents(&self) -> Cents {
        self.amount_cents
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}
