use crate::domain::{format_cents, Cents, MonthlyTotal, Summary, Transaction};

/// Text rendering for the session: a table, three totals and a bar chart.
pub struct Renderer {
    currency: String,
}

impl Renderer {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// "$12.50", or "-$12.50" for negative amounts
    pub fn money(&self, cents: Cents) -> String {
        if cents < 0 {
            let formatted = format_cents(cents);
            format!("-{}{}", self.currency, formatted.trim_start_matches('-'))
        } else {
            format!("{}{}", self.currency, format_cents(cents))
        }
    }

    pub fn transaction_line(&self, transaction: &Transaction) -> String {
        format!(
            "{} {} {} {}",
            transaction.date().format("%Y-%m-%d"),
            transaction.kind(),
            transaction.category(),
            self.money(transaction.amount_cents())
        )
    }

    pub fn transactions_table(&self, transactions: &[Transaction]) -> String {
        if transactions.is_empty() {
            return "No transactions recorded.\n".to_string();
        }

        let mut out = format!(
            "{:<12} {:<8} {:<14} {:>14}\n",
            "DATE", "TYPE", "CATEGORY", "AMOUNT"
        );
        out.push_str(&"-".repeat(51));
        out.push('\n');
        for transaction in transactions {
            out.push_str(&format!(
                "{:<12} {:<8} {:<14} {:>14}\n",
                transaction.date().format("%Y-%m-%d").to_string(),
                transaction.kind().as_str(),
                transaction.category().as_str(),
                self.money(transaction.amount_cents())
            ));
        }
        out
    }

    pub fn summary(&self, summary: &Summary) -> String {
        format!(
            "Total Income: {}\nTotal Expense: {}\nBalance: {}\n",
            self.money(summary.total_income),
            self.money(summary.total_expense),
            self.money(summary.balance)
        )
    }

    /// Horizontal bars scaled so the largest month fills `width` columns.
    /// Any month with a non-zero total gets at least one column.
    pub fn monthly_chart(&self, series: &[MonthlyTotal], width: usize) -> String {
        if series.is_empty() {
            return "No expenses recorded.\n".to_string();
        }

        let max = series.iter().map(|m| m.total).max().unwrap_or(0);
        let mut out = String::from("Monthly Expense\n");
        for entry in series {
            let bar_len = bar_length(entry.total, max, width);
            out.push_str(&format!(
                "{}  {:<width$}  {}\n",
                entry.month,
                "#".repeat(bar_len),
                self.money(entry.total),
                width = width
            ));
        }
        out
    }
}

fn bar_length(total: Cents, max: Cents, width: usize) -> usize {
    if max <= 0 || total <= 0 {
        return 0;
    }
    let scaled = (total as i128 * width as i128 / max as i128) as usize;
    scaled.max(1)
}
