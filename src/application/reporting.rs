use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{MonthlyTotal, Summary, Transaction};

use super::LedgerStore;

/// Everything the session shows, captured at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerReport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    pub monthly_expenses: Vec<MonthlyTotal>,
}

impl LedgerReport {
    pub fn from_store(store: &LedgerStore) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            transactions: store.transactions().to_vec(),
            summary: store.summary(),
            monthly_expenses: store.monthly_expense_series(),
        }
    }
}
