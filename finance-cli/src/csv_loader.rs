//! CSV loader for exported transactions.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter.
//! Whitespace around values is trimmed.
//!
//! | Column     | Required | Type    | Notes                                   |
//! |------------|----------|---------|-----------------------------------------|
//! | `id`       | yes      | integer |                                         |
//! | `date`     | yes      | date    | `YYYY-MM-DD`                            |
//! | `kind`     | yes      | string  | `income` or `expense` (any case)        |
//! | `category` | yes      | string  | May be blank ("uncategorized")          |
//! | `amount`   | yes      | decimal | Positive; `1,234.50` and `$12` accepted |
//! | `wallet`   | no       | string  | Leave cell empty for `None`             |
//! | `note`     | no       | string  | Leave cell empty for `None`             |
//!
//! ### Example
//!
//! ```csv
//! id,date,kind,category,amount,wallet,note
//! 1,2025-03-01,income,Salary,"3,000.00",Bank,March pay
//! 2,2025-03-03,expense,Food,120.00,Cash,
//! ```

use std::path::Path;

use chrono::NaiveDate;
use finance_core::{Transaction, TransactionKind};
use serde::Deserialize;
use tracing::debug;

use crate::utils::{ParseAmountError, non_blank, parse_amount};

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: i64,
    date: NaiveDate,
    kind: String,
    category: String,
    amount: String,
    wallet: Option<String>,
    note: Option<String>,
}

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, missing required column, unparseable id or date.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based; the header is row 0.
    #[error("unrecognised transaction kind '{kind}' on row {row}")]
    InvalidKind { kind: String, row: usize },

    #[error("{source} on row {row}")]
    InvalidAmount {
        row: usize,
        #[source]
        source: ParseAmountError,
    },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Transaction, CsvLoadError> {
    let kind = TransactionKind::parse(&row.kind).ok_or_else(|| CsvLoadError::InvalidKind {
        kind: row.kind.clone(),
        row: row_number,
    })?;
    let amount = parse_amount(&row.amount).map_err(|source| CsvLoadError::InvalidAmount {
        row: row_number,
        source,
    })?;

    Ok(Transaction {
        id: row.id,
        date: row.date,
        kind,
        category: row.category,
        amount,
        wallet: non_blank(row.wallet),
        note: non_blank(row.note),
    })
}

/// Parses CSV text into transactions, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] if the CSV is structurally invalid or a required
///   field cannot be deserialised.
/// * [CsvLoadError::InvalidKind] / [CsvLoadError::InvalidAmount] for the
///   first row with a bad `kind` or `amount`.
pub fn load_from_str(input: &str) -> Result<Vec<Transaction>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads a file from disk and delegates to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<Transaction>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let transactions = load_from_str(&contents)?;
    debug!(path = %path.display(), count = transactions.len(), "loaded transactions");
    Ok(transactions)
}
