use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use finance_core::calculations::DateRange;
use finance_core::{Locale, TransactionKind};
use tracing::{debug, info};

use finance_cli::app::{self, DashboardOptions};
use finance_cli::settings::{DEFAULT_LOG_LEVEL, Settings};
use finance_cli::utils::{parse_kind, parse_month};
use finance_cli::{csv_loader, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal finance tracker tools: the amount calculator and the dashboard.
#[derive(Debug, Parser)]
#[command(name = "finance", version, about)]
struct Cli {
    /// TOML settings file (locale, currency, log_level).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Display language, e.g. `en`, `es-ES`, `ru`.
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// ISO 4217 currency code used when formatting amounts.
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Amount-entry calculator.
    ///
    /// Keys: digits, `.`, `+ - * /`, `=`, `C` to clear, `A` to apply.
    /// Without `--keys`, reads one line of keys at a time from stdin.
    Calc {
        /// Amount to start from.
        #[arg(long, allow_hyphen_values = true)]
        initial: Option<String>,

        /// Key sequence to replay instead of reading stdin.
        #[arg(long, allow_hyphen_values = true)]
        keys: Option<String>,
    },

    /// Income/expense summary and category breakdown from a transactions CSV.
    Dashboard {
        /// Transactions CSV export.
        #[arg(long)]
        file: PathBuf,

        /// Which side of the ledger to break down.
        #[arg(long, default_value = "expense", value_parser = parse_kind)]
        kind: TransactionKind,

        /// Show only the N largest categories and group the rest.
        #[arg(long)]
        top: Option<usize>,

        /// Calendar month to report on, as YYYY-MM.
        #[arg(long, value_parser = parse_month, conflicts_with_all = ["from", "to"])]
        month: Option<DateRange>,

        /// First day to include (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(DEFAULT_LOG_LEVEL);

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => Settings::default(),
    }
    .with_overrides(cli.locale, cli.currency);

    if !logging::env_filter_is_set() {
        logging::set_log_level(&settings.log_level)?;
    }
    debug!(locale = %settings.locale, currency = %settings.currency, "settings resolved");

    let formatter = settings.formatter();
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Calc { initial, keys } => {
            app::run_calculator(
                &formatter,
                initial.as_deref(),
                keys.as_deref(),
                io::stdin().lock(),
                &mut out,
            )?;
        }
        Command::Dashboard {
            file,
            kind,
            top,
            month,
            from,
            to,
        } => {
            let transactions = csv_loader::load_from_file(&file)
                .with_context(|| format!("Failed to load transactions: {}", file.display()))?;
            info!(count = transactions.len(), "transactions loaded");

            let options = DashboardOptions {
                kind,
                top,
                range: month.unwrap_or_else(|| DateRange::new(from, to)),
            };
            app::run_dashboard(&formatter, &transactions, &options, &mut out)?;
        }
    }

    Ok(())
}
