mod render;

pub use render::Renderer;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::application::LedgerStore;
use crate::io::Exporter;

/// Personal Budget Tracker
///
/// Starts a session that reads commands from stdin, one per line.
/// Nothing is saved when the session ends; use `export` to keep a copy.
#[derive(Parser)]
#[command(name = "budget-tracker")]
#[command(about = "Record income and expenses, see totals and monthly spending")]
#[command(version)]
pub struct Cli {
    /// Currency symbol shown in front of amounts
    #[arg(short, long, env = "BUDGET_TRACKER_CURRENCY", default_value = "$")]
    pub currency: String,

    /// Enable debug logging (on stderr)
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not print the "> " prompt, for piped input
    #[arg(long, env = "BUDGET_TRACKER_NO_PROMPT")]
    pub no_prompt: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();

        let mut session = Session::new(
            LedgerStore::new(),
            Renderer::new(self.currency),
            stdout.lock(),
        );
        session.run(stdin.lock(), !self.no_prompt)
    }
}

/// One line of session input.
#[derive(Parser)]
#[command(name = "budget-tracker", no_binary_name = true)]
#[command(disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Record an income or an expense
    Add {
        /// Income or Expense
        kind: String,

        /// Salary, Business, Food, Rent, Entertainment or Other
        category: String,

        /// Amount (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show every transaction recorded so far
    List,

    /// Show total income, total expense and balance
    Summary,

    /// Show a bar chart of expenses per month
    Chart {
        /// Width of the longest bar (1-200)
        #[arg(
            short,
            long,
            default_value_t = 40,
            value_parser = clap::value_parser!(u16).range(1..=200)
        )]
        width: u16,
    },

    /// Write session data as CSV or JSON
    Export {
        /// What to export
        target: ExportTarget,

        /// Output file (stdout if omitted). Quote paths that contain spaces
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportTarget {
    /// Transaction table as CSV
    Transactions,
    /// Monthly expense totals as CSV
    Monthly,
    /// Transactions, summary and monthly totals as JSON
    Report,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session. Owns the ledger for as long as it runs.
pub struct Session<W: Write> {
    store: LedgerStore,
    renderer: Renderer,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(store: LedgerStore, renderer: Renderer, out: W) -> Self {
        Self {
            store,
            renderer,
            out,
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> Result<()> {
        tracing::info!("session started");

        if prompt {
            self.print_prompt()?;
        }
        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            if self.execute(&line)? == Flow::Quit {
                break;
            }
            if prompt {
                self.print_prompt()?;
            }
        }

        tracing::info!(transactions = self.store.len(), "session ended");
        Ok(())
    }

    /// Run a single command line. Bad input is reported on the output, not returned as an error.
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        tracing::debug!(line, "executing command");

        // Shell-style quoting, so `export report -o "my report.json"` works
        let args = match shell_words::split(line) {
            Ok(args) => args,
            Err(err) => {
                writeln!(self.out, "Error: {}", err)?;
                return Ok(Flow::Continue);
            }
        };

        let command = match SessionLine::try_parse_from(args) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                write!(self.out, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            SessionCommand::Add {
                kind,
                category,
                amount,
                date,
            } => {
                let date =
                    date.unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
                match self.store.append(&date, &kind, &category, &amount) {
                    Ok(transaction) => {
                        let line = self.renderer.transaction_line(transaction);
                        writeln!(self.out, "Added: {}", line)?;
                    }
                    Err(err) => writeln!(self.out, "Error: {}", err)?,
                }
            }

            SessionCommand::List => {
                let table = self.renderer.transactions_table(self.store.transactions());
                write!(self.out, "{}", table)?;
            }

            SessionCommand::Summary => {
                let summary = self.renderer.summary(&self.store.summary());
                write!(self.out, "{}", summary)?;
            }

            SessionCommand::Chart { width } => {
                let series = self.store.monthly_expense_series();
                write!(self.out, "{}", self.renderer.monthly_chart(&series, width.into()))?;
            }

            SessionCommand::Export { target, output } => {
                self.run_export(target, output)?;
            }

            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn run_export(&mut self, target: ExportTarget, output: Option<PathBuf>) -> Result<()> {
        let exporter = Exporter::new(&self.store);

        let Some(path) = output else {
            match target {
                ExportTarget::Transactions => {
                    exporter.export_transactions_csv(&mut self.out)?;
                }
                ExportTarget::Monthly => {
                    exporter.export_monthly_csv(&mut self.out)?;
                }
                ExportTarget::Report => {
                    exporter.export_report_json(&mut self.out)?;
                }
            }
            return Ok(());
        };

        let file = match File::create(&path) {
            Ok(file) => file,
            Err(err) => {
                // The session keeps going; the user can pick another path
                tracing::warn!(path = %path.display(), %err, "export failed");
                writeln!(self.out, "Error: cannot write {}: {}", path.display(), err)?;
                return Ok(());
            }
        };

        match target {
            ExportTarget::Transactions => {
                let count = exporter
                    .export_transactions_csv(file)
                    .with_context(|| format!("Failed to export to {}", path.display()))?;
                writeln!(self.out, "Exported {} transactions to {}", count, path.display())?;
            }
            ExportTarget::Monthly => {
                let count = exporter
                    .export_monthly_csv(file)
                    .with_context(|| format!("Failed to export to {}", path.display()))?;
                writeln!(self.out, "Exported {} months to {}", count, path.display())?;
            }
            ExportTarget::Report => {
                exporter
                    .export_report_json(file)
                    .with_context(|| format!("Failed to export to {}", path.display()))?;
                writeln!(self.out, "Exported report to {}", path.display())?;
            }
        }

        Ok(())
    }

    fn print_prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<Vec<u8>> {
        Session::new(LedgerStore::new(), Renderer::new("$"), Vec::new())
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn test_add_then_summary() {
        let mut session = session();
        session
            .execute("add Income Salary 3000 --date 2024-01-15")
            .unwrap();
        session
            .execute("add expense rent 1200 -d 2024-01-20")
            .unwrap();
        session.execute("summary").unwrap();

        assert_eq!(session.store().len(), 2);
        let out = output(session);
        assert!(out.contains("Added: 2024-01-15 Income Salary $3000.00"));
        assert!(out.contains("Total Income: $3000.00"));
        assert!(out.contains("Total Expense: $1200.00"));
        assert!(out.contains("Balance: $1800.00"));
    }

    #[test]
    fn test_negative_amount_reports_error_and_continues() {
        let mut session = session();

        let flow = session
            .execute("add Income Salary -5 --date 2024-01-15")
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(session.store().is_empty());
        assert!(output(session).contains("Error: Amount must not be negative"));
    }

    #[test]
    fn test_add_defaults_to_today() {
        let mut session = session();
        session.execute("add Expense Food 12.50").unwrap();

        let today = Local::now().date_naive();
        assert_eq!(session.store().transactions()[0].date(), today);
    }

    #[test]
    fn test_unknown_command_does_not_end_session() {
        let mut session = session();
        assert_eq!(session.execute("frobnicate").unwrap(), Flow::Continue);
        assert!(output(session).contains("frobnicate"));
    }

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let mut session = session();
        assert_eq!(session.execute("").unwrap(), Flow::Continue);
        assert_eq!(session.execute("   # note").unwrap(), Flow::Continue);
        assert!(output(session).is_empty());
    }

    #[test]
    fn test_quit_and_exit() {
        let mut session = session();
        assert_eq!(session.execute("quit").unwrap(), Flow::Quit);
        assert_eq!(session.execute("exit").unwrap(), Flow::Quit);
    }

    #[test]
    fn test_run_stops_at_quit() {
        let mut session = session();
        let input = "add Expense Food 10 --date 2024-02-01\nquit\nadd Expense Food 10 --date 2024-02-02\n";

        session.run(input.as_bytes(), false).unwrap();

        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_chart_on_empty_ledger() {
        let mut session = session();
        session.execute("chart").unwrap();
        assert_eq!(output(session), "No expenses recorded.\n");
    }

    #[test]
    fn test_export_transactions_to_stdout() {
        let mut session = session();
        session
            .execute("add Expense Rent 1200 --date 2024-01-20")
            .unwrap();
        session.execute("export transactions").unwrap();

        let out = output(session);
        assert!(out.contains("date,kind,category,amount\n2024-01-20,Expense,Rent,1200.00\n"));
    }

    #[test]
    fn test_chart_width_out_of_range_is_rejected() {
        let mut session = session();
        session
            .execute("add Expense Food 300 --date 2024-02-05")
            .unwrap();

        let flow = session
            .execute("chart --width 18446744073709551615")
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(session.execute("chart -w 0").unwrap(), Flow::Continue);
        session.execute("chart -w 200").unwrap();

        let out = output(session);
        assert!(out.contains("invalid value '18446744073709551615'"));
        assert!(out.contains("invalid value '0'"));
        assert!(out.contains(&format!("2024-02  {}  $300.00", "#".repeat(200))));
    }

    #[test]
    fn test_quoted_export_path_with_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my transactions.csv");

        let mut session = session();
        session
            .execute("add Income Salary 3000 --date 2024-01-15")
            .unwrap();
        session
            .execute(&format!("export transactions -o \"{}\"", path.display()))
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "date,kind,category,amount\n2024-01-15,Income,Salary,3000.00\n"
        );
    }

    #[test]
    fn test_unbalanced_quote_reports_error() {
        let mut session = session();
        assert_eq!(
            session.execute("export report -o \"oops").unwrap(),
            Flow::Continue
        );
        assert!(output(session).starts_with("Error: "));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monthly.csv");

        let mut session = session();
        session
            .execute("add Expense Food 300 --date 2024-02-05")
            .unwrap();
        session
            .execute(&format!("export monthly -o {}", path.display()))
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "month,total\n2024-02,300.00\n"
        );
        assert!(output(session).contains("Exported 1 months to"));
    }
}
