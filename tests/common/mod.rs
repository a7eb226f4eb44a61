// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use budget_tracker::LedgerStore;
use chrono::NaiveDate;

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: the salary / rent / food month pair
pub struct ScenarioLedger;

impl ScenarioLedger {
    /// Salary in January, rent in January, food in February
    pub fn create() -> Result<LedgerStore> {
        let mut store = LedgerStore::new();
        store.append("2024-01-15", "Income", "Salary", "3000")?;
        store.append("2024-01-20", "Expense", "Rent", "1200")?;
        store.append("2024-02-05", "Expense", "Food", "300")?;
        Ok(store)
    }

    /// Session input that records the same three transactions
    pub fn script() -> &'static str {
        "add Income Salary 3000 --date 2024-01-15\n\
         add Expense Rent 1200 --date 2024-01-20\n\
         add Expense Food 300 --date 2024-02-05\n"
    }
}
