use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Cents, Transaction, TransactionKind};

/// Calendar month used as the grouping key of the monthly expense series.
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid year-month '{}' (expected YYYY-MM)", s);
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Totals over the whole ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Cents,
    pub total_expense: Cents,
    /// total_income - total_expense; negative when spending exceeds income
    pub balance: Cents,
}

/// One bar of the monthly expense chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Cents,
}

/// Compute income, expense and balance from a list of transactions.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let (total_income, total_expense) =
        transactions
            .iter()
            .fold((0, 0), |(income, expense), transaction| match transaction.kind() {
                TransactionKind::Income => (income + transaction.amount_cents(), expense),
                TransactionKind::Expense => (income, expense + transaction.amount_cents()),
            });

    Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

/// Sum expenses per calendar month, oldest month first.
/// Returns an empty series when there are no expenses.
pub fn monthly_expense_series(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<YearMonth, Cents> = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        *by_month
            .entry(YearMonth::from_date(transaction.date()))
            .or_insert(0) += transaction.amount_cents();
    }

    by_month
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}
