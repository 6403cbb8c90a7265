use finance_core::TransactionKind;
use finance_core::calculations::DateRange;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("invalid amount '{0}'")]
    Invalid(String),

    #[error("amount '{0}' must not be negative")]
    Negative(String),
}

/// Removes currency symbols, whitespace and comma thousands separators.
fn normalize_amount_input(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '₽' | ',') && !c.is_whitespace())
        .collect()
}

/// Parses a positive money amount as exported by the API or typed by hand.
///
/// Accepts `"1,234.56"` and `"$ 12.00"`. Blank input is an error, since every
/// transaction has an amount.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    let amount: Decimal = normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        ParseAmountError::Invalid(s.to_string())
    })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ParseAmountError::Negative(s.to_string()));
    }
    Ok(amount)
}

/// Trims an optional text cell, mapping blank cells to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Clap value parser for `--kind`.
pub fn parse_kind(s: &str) -> Result<TransactionKind, String> {
    TransactionKind::parse(s).ok_or_else(|| format!("expected 'income' or 'expense', got '{s}'"))
}

/// Clap value parser for `--month YYYY-MM`.
pub fn parse_month(s: &str) -> Result<DateRange, String> {
    let invalid = || format!("expected a month as YYYY-MM, got '{s}'");

    let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    DateRange::month(year, month).ok_or_else(invalid)
}
