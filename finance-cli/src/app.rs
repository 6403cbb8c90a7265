//! Command implementations, kept apart from `main` so they can be driven
//! with in-memory readers and writers.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::Datelike;
use finance_core::calculations::common::normalize_float;
use finance_core::calculations::{
    AmountCalculator, CalculatorState, CategoryBreakdown, DashboardSummary, DateRange,
};
use finance_core::{Formatter, MessageKey, Transaction, TransactionKind};
use tracing::{info, warn};

use crate::keypad::{KeypadEvent, parse_keys};

/// Options for the `dashboard` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    pub kind: TransactionKind,
    /// Fold categories beyond this many into "other".
    pub top: Option<usize>,
    pub range: DateRange,
}

/// Presses `events` in order. Returns `true` once a value has been applied.
fn feed<F, W>(
    calculator: &mut AmountCalculator<F>,
    events: &[KeypadEvent],
    out: &mut W,
) -> Result<bool>
where
    F: FnMut(f64),
    W: Write,
{
    for event in events {
        match event {
            KeypadEvent::Key(key) => calculator.press(*key),
            KeypadEvent::Apply => {
                if calculator.apply() {
                    return Ok(true);
                }
            }
        }
    }
    writeln!(out, "{}", calculator.display_text())?;
    Ok(false)
}

/// Runs the amount calculator.
///
/// With `keys`, the whole sequence is replayed at once; otherwise keypad
/// lines are read from `input` until a value is applied or input ends. The
/// display is printed after every line. Returns the applied amount, if any.
pub fn run_calculator<R, W>(
    formatter: &Formatter,
    initial: Option<&str>,
    keys: Option<&str>,
    input: R,
    out: &mut W,
) -> Result<Option<f64>>
where
    R: BufRead,
    W: Write,
{
    let state = initial
        .map(CalculatorState::from_text)
        .unwrap_or_default();

    let mut applied = None;
    {
        let mut calculator =
            AmountCalculator::open(state, formatter.translator(), |value| applied = Some(value));
        writeln!(out, "{}", calculator.display_text())?;

        match keys {
            Some(keys) => {
                let events = parse_keys(keys).context("invalid keypad sequence")?;
                feed(&mut calculator, &events, out)?;
            }
            None => {
                for line in input.lines() {
                    let line = line.context("failed to read keypad input")?;
                    match parse_keys(&line) {
                        Ok(events) => {
                            if feed(&mut calculator, &events, out)? {
                                break;
                            }
                        }
                        Err(error) => {
                            warn!(%error, "rejected keypad input");
                            writeln!(out, "{error}")?;
                        }
                    }
                }
            }
        }
    }

    if let Some(value) = applied {
        info!(value, "calculator value applied");
        writeln!(
            out,
            "{}: {}",
            formatter.translate(MessageKey::AppliedAmount),
            format_applied(formatter, value)
        )?;
    }
    Ok(applied)
}

fn format_applied(
    formatter: &Formatter,
    value: f64,
) -> String {
    match normalize_float(value, 2) {
        Some(amount) => formatter.format_currency(amount),
        None => value.to_string(),
    }
}

/// Heading for the selected period: a month name for whole months,
/// otherwise the bounds as dates.
pub fn period_heading(
    formatter: &Formatter,
    range: &DateRange,
) -> Option<String> {
    match (range.from, range.to) {
        (Some(from), Some(to)) => {
            if DateRange::month(from.year(), from.month()) == Some(*range) {
                Some(formatter.format_month(from))
            } else {
                Some(format!(
                    "{} - {}",
                    formatter.format_date(from),
                    formatter.format_date(to)
                ))
            }
        }
        (Some(from), None) => Some(format!("{} -", formatter.format_date(from))),
        (None, Some(to)) => Some(format!("- {}", formatter.format_date(to))),
        (None, None) => None,
    }
}

/// Prints the period summary followed by the category breakdown.
pub fn run_dashboard<W: Write>(
    formatter: &Formatter,
    transactions: &[Transaction],
    options: &DashboardOptions,
    out: &mut W,
) -> Result<()> {
    if let Some(heading) = period_heading(formatter, &options.range) {
        writeln!(out, "{heading}")?;
    }

    let summary = DashboardSummary::from_transactions(transactions, &options.range);
    let rows = [
        (MessageKey::Income, formatter.format_currency(summary.income)),
        (MessageKey::Expense, formatter.format_currency(summary.expense)),
        (MessageKey::Balance, formatter.format_currency(summary.balance)),
        (MessageKey::Transactions, summary.transaction_count.to_string()),
    ];
    for (key, value) in rows {
        writeln!(out, "{}: {value}", formatter.translate(key))?;
    }
    writeln!(out)?;

    let mut breakdown =
        CategoryBreakdown::from_transactions(transactions, options.kind, &options.range, formatter);
    if let Some(n) = options.top {
        breakdown = breakdown.top(n, formatter);
    }

    let title = match options.kind {
        TransactionKind::Income => MessageKey::Income,
        TransactionKind::Expense => MessageKey::Expense,
    };
    writeln!(out, "{}", formatter.translate(title))?;
    if breakdown.is_empty() {
        writeln!(out, "  {}", formatter.translate(MessageKey::NoTransactions))?;
    }
    for share in &breakdown.shares {
        writeln!(out, "  {}", share.label)?;
    }
    Ok(())
}
