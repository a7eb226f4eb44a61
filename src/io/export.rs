use anyhow::Result;
use std::io::Write;

use crate::application::{LedgerReport, LedgerStore};
use crate::domain::format_cents;

/// Writes the current session's data to CSV or JSON.
pub struct Exporter<'a> {
    store: &'a LedgerStore,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Export the transaction table to CSV, in insertion order
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["date", "kind", "category", "amount"])?;

        let mut count = 0;
        for transaction in self.store.transactions() {
            csv_writer.write_record([
                transaction.date().format("%Y-%m-%d").to_string().as_str(),
                transaction.kind().as_str(),
                transaction.category().as_str(),
                format_cents(transaction.amount_cents()).as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the monthly expense series to CSV
    pub fn export_monthly_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["month", "total"])?;

        let series = self.store.monthly_expense_series();
        for entry in &series {
            csv_writer.write_record([entry.month.to_string(), format_cents(entry.total)])?;
        }

        csv_writer.flush()?;
        Ok(series.len())
    }

    /// Export transactions, summary and monthly series as one JSON document
    pub fn export_report_json<W: Write>(&self, mut writer: W) -> Result<LedgerReport> {
        let report = LedgerReport::from_store(self.store);

        let json = serde_json::to_string_pretty(&report)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(report)
    }
}
