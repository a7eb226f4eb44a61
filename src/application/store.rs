use chrono::NaiveDate;

use crate::domain::{
    self, parse_cents, Category, Cents, MonthlyTotal, Summary, Transaction, TransactionKind,
};

use super::ValidationError;

/// In-memory ledger for one session.
/// This is the primary interface for any client (CLI, tests, a future UI).
#[derive(Debug, Default)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw form input and record it.
    ///
    /// `date` is `YYYY-MM-DD`, `kind` and `category` are matched
    /// case-insensitively, `amount` is a non-negative decimal with at most
    /// two fractional digits. On error the ledger is left untouched.
    pub fn append(
        &mut self,
        date: &str,
        kind: &str,
        category: &str,
        amount: &str,
    ) -> Result<&Transaction, ValidationError> {
        let parsed = parse_input(date, kind, category, amount);
        match parsed {
            Ok((date, kind, category, amount_cents)) => {
                self.record(date, kind, category, amount_cents)
            }
            Err(err) => {
                tracing::debug!(%err, "rejected transaction");
                Err(err)
            }
        }
    }

    /// Record an already-typed transaction. Only the amount needs checking:
    /// it must not be negative, and adding it must keep the income or expense
    /// total within `Cents`. Monthly totals never exceed the expense total.
    pub fn record(
        &mut self,
        date: NaiveDate,
        kind: TransactionKind,
        category: Category,
        amount_cents: Cents,
    ) -> Result<&Transaction, ValidationError> {
        if amount_cents < 0 {
            let err = ValidationError::NegativeAmount(amount_cents);
            tracing::debug!(%err, "rejected transaction");
            return Err(err);
        }

        let summary = self.summary();
        let running_total = match kind {
            TransactionKind::Income => summary.total_income,
            TransactionKind::Expense => summary.total_expense,
        };
        if running_total.checked_add(amount_cents).is_none() {
            let err = ValidationError::AmountTooLarge(amount_cents);
            tracing::debug!(%err, "rejected transaction");
            return Err(err);
        }

        self.transactions
            .push(Transaction::new(date, kind, category, amount_cents));
        tracing::debug!(
            %date,
            %kind,
            %category,
            amount_cents,
            count = self.transactions.len(),
            "recorded transaction"
        );

        // Just pushed, so there is a last element
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Every transaction in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn summary(&self) -> Summary {
        domain::summarize(&self.transactions)
    }

    /// Expense totals per month, oldest first. Empty when nothing was spent.
    pub fn monthly_expense_series(&self) -> Vec<MonthlyTotal> {
        domain::monthly_expense_series(&self.transactions)
    }
}

fn parse_input(
    date: &str,
    kind: &str,
    category: &str,
    amount: &str,
) -> Result<(NaiveDate, TransactionKind, Category, Cents), ValidationError> {
    let parsed_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
    let parsed_kind: TransactionKind = kind
        .parse()
        .map_err(|_| ValidationError::UnknownKind(kind.to_string()))?;
    let parsed_category: Category = category
        .parse()
        .map_err(|_| ValidationError::UnknownCategory(category.to_string()))?;
    let amount_cents = parse_cents(amount).map_err(|source| ValidationError::InvalidAmount {
        input: amount.to_string(),
        source,
    })?;

    Ok((parsed_date, parsed_kind, parsed_category, amount_cents))
}
