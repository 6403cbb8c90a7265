//! Dashboard aggregation.
//!
//! Turns a list of transactions into the figures the dashboard shows: the
//! income/expense/balance summary for a period and the per-category
//! breakdown that feeds the pie chart.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::i18n::{Formatter, MessageKey};
use crate::models::{Transaction, TransactionKind};

/// Inclusive date filter; an open end matches everything on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        Self { from, to }
    }

    /// Every day of the given calendar month, or `None` for an invalid month.
    pub fn month(
        year: i32,
        month: u32,
    ) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self::new(Some(first), next_first.pred_opt()))
    }

    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Income, expense and balance totals for a period.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub income: Decimal,
    pub expense: Decimal,
    /// `income - expense`; negative when spending exceeds income.
    pub balance: Decimal,
    pub transaction_count: usize,
}

impl DashboardSummary {
    pub fn from_transactions<'a, I>(
        transactions: I,
        range: &DateRange,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = Self::default();
        for transaction in transactions
            .into_iter()
            .filter(|t| range.contains(t.date))
        {
            match transaction.kind {
                TransactionKind::Income => summary.income += transaction.amount,
                TransactionKind::Expense => summary.expense += transaction.amount,
            }
            summary.balance += transaction.signed_amount();
            summary.transaction_count += 1;
        }
        summary
    }
}

/// One slice of the category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    /// Share of the breakdown total, in percent, rounded to two places.
    pub percentage: Decimal,
    /// Legend text, e.g. `Food: $30.00 (50.00%)`.
    pub label: String,
}

impl CategoryShare {
    fn new(
        category: String,
        total: Decimal,
        grand_total: Decimal,
        formatter: &Formatter,
    ) -> Self {
        let percentage = round_half_up(total / grand_total * Decimal::ONE_HUNDRED);
        let label = format!(
            "{category}: {} ({}%)",
            formatter.format_currency(total),
            formatter.format_number(percentage, 2)
        );
        Self {
            category,
            total,
            percentage,
            label,
        }
    }
}

/// Per-category totals of one transaction kind, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub kind: TransactionKind,
    pub total: Decimal,
    pub shares: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    /// Sums `kind` transactions inside `range` per category.
    ///
    /// Category names are trimmed; blank names are grouped under the
    /// translated "uncategorized" label. Shares are ordered by total
    /// (descending), ties by name. A zero total yields no shares.
    pub fn from_transactions<'a, I>(
        transactions: I,
        kind: TransactionKind,
        range: &DateRange,
        formatter: &Formatter,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let uncategorized = formatter.translate(MessageKey::Uncategorized);

        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for transaction in transactions
            .into_iter()
            .filter(|t| t.kind == kind && range.contains(t.date))
        {
            let name = match transaction.category.trim() {
                "" => uncategorized,
                name => name,
            };
            *totals.entry(name.to_string()).or_default() += transaction.amount;
        }

        let total: Decimal = totals.values().copied().sum();
        if total.is_zero() {
            return Self {
                kind,
                total: Decimal::ZERO,
                shares: Vec::new(),
            };
        }

        let mut shares: Vec<CategoryShare> = totals
            .into_iter()
            .map(|(category, amount)| CategoryShare::new(category, amount, total, formatter))
            .collect();
        shares.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });

        Self {
            kind,
            total,
            shares,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Keeps the `n` largest shares and folds the rest into one translated
    /// "other" share at the end.
    pub fn top(
        &self,
        n: usize,
        formatter: &Formatter,
    ) -> Self {
        if self.shares.len() <= n {
            return self.clone();
        }

        let (head, tail) = self.shares.split_at(n);
        let other_total: Decimal = tail.iter().map(|share| share.total).sum();

        let mut shares = head.to_vec();
        shares.push(CategoryShare::new(
            formatter.translate(MessageKey::Other).to_string(),
            other_total,
            self.total,
            formatter,
        ));

        Self {
            kind: self.kind,
            total: self.total,
            shares,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::i18n::Locale;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(
        id: i64,
        day: u32,
        kind: TransactionKind,
        category: &str,
        amount: Decimal,
    ) -> Transaction {
        Transaction {
            id,
            date: date(2025, 3, day),
            kind,
            category: category.to_string(),
            amount,
            wallet: None,
            note: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        use TransactionKind::{Expense, Income};
        vec![
            tx(1, 1, Income, "Salary", dec!(3000.00)),
            tx(2, 3, Expense, "Food", dec!(120.00)),
            tx(3, 5, Expense, "Rent", dec!(900.00)),
            tx(4, 9, Expense, "Food", dec!(80.00)),
            tx(5, 12, Expense, "Transport", dec!(50.00)),
            tx(6, 20, Expense, "  ", dec!(25.00)),
            tx(7, 28, Income, "Freelance", dec!(500.00)),
            tx(8, 30, Expense, "Fun", dec!(25.00)),
        ]
    }

    // =========================================================================
    // DateRange tests
    // =========================================================================

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let range = DateRange::new(Some(date(2025, 3, 5)), Some(date(2025, 3, 9)));

        assert!(range.contains(date(2025, 3, 5)));
        assert!(range.contains(date(2025, 3, 9)));
        assert!(!range.contains(date(2025, 3, 4)));
        assert!(!range.contains(date(2025, 3, 10)));
    }

    #[test]
    fn open_range_contains_everything() {
        assert!(DateRange::default().contains(date(1999, 1, 1)));
    }

    #[test]
    fn month_range_covers_whole_month() {
        let feb = DateRange::month(2024, 2).unwrap();
        let dec = DateRange::month(2025, 12).unwrap();

        assert_eq!(feb.from, Some(date(2024, 2, 1)));
        assert_eq!(feb.to, Some(date(2024, 2, 29)));
        assert_eq!(dec.to, Some(date(2025, 12, 31)));
        assert_eq!(DateRange::month(2025, 13), None);
    }

    // =========================================================================
    // DashboardSummary tests
    // =========================================================================

    #[test]
    fn summary_totals_income_expense_and_balance() {
        let summary = DashboardSummary::from_transactions(&sample(), &DateRange::default());

        assert_eq!(summary.income, dec!(3500.00));
        assert_eq!(summary.expense, dec!(1200.00));
        assert_eq!(summary.balance, dec!(2300.00));
        assert_eq!(summary.transaction_count, 8);
    }

    #[test]
    fn summary_respects_date_range() {
        let range = DateRange::new(Some(date(2025, 3, 2)), Some(date(2025, 3, 10)));
        let summary = DashboardSummary::from_transactions(&sample(), &range);

        assert_eq!(summary.income, dec!(0));
        assert_eq!(summary.expense, dec!(1100.00));
        assert_eq!(summary.balance, dec!(-1100.00));
        assert_eq!(summary.transaction_count, 3);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let none: Vec<Transaction> = Vec::new();
        let summary = DashboardSummary::from_transactions(&none, &DateRange::default());

        assert_eq!(summary, DashboardSummary::default());
    }

    // =========================================================================
    // CategoryBreakdown tests
    // =========================================================================

    #[test]
    fn breakdown_sums_per_category_and_sorts_descending() {
        let formatter = Formatter::default();
        let breakdown = CategoryBreakdown::from_transactions(
            &sample(),
            TransactionKind::Expense,
            &DateRange::default(),
            &formatter,
        );

        let categories: Vec<_> = breakdown
            .shares
            .iter()
            .map(|s| (s.category.as_str(), s.total))
            .collect();

        assert_eq!(breakdown.total, dec!(1200.00));
        assert_eq!(
            categories,
            vec![
                ("Rent", dec!(900.00)),
                ("Food", dec!(200.00)),
                ("Transport", dec!(50.00)),
                ("Fun", dec!(25.00)),
                ("Uncategorized", dec!(25.00)),
            ]
        );
    }

    #[test]
    fn breakdown_percentages_are_rounded_half_up() {
        let breakdown = CategoryBreakdown::from_transactions(
            &sample(),
            TransactionKind::Expense,
            &DateRange::default(),
            &Formatter::default(),
        );

        let percentages: Vec<_> = breakdown.shares.iter().map(|s| s.percentage).collect();

        // 25 / 1200 = 2.0833..
        assert_eq!(
            percentages,
            vec![dec!(75.00), dec!(16.67), dec!(4.17), dec!(2.08), dec!(2.08)]
        );
    }

    #[test]
    fn breakdown_labels_use_locale_formatting() {
        let en = CategoryBreakdown::from_transactions(
            &sample(),
            TransactionKind::Expense,
            &DateRange::default(),
            &Formatter::new(Locale::En, "USD"),
        );
        let es = CategoryBreakdown::from_transactions(
            &sample(),
            TransactionKind::Expense,
            &DateRange::default(),
            &Formatter::new(Locale::Es, "EUR"),
        );

        assert_eq!(en.shares[1].label, "Food: $200.00 (16.67%)");
        assert_eq!(es.shares[1].label, "Food: 200,00 € (16,67%)");
        assert_eq!(es.shares[4].category, "Sin categoría");
    }

    #[test]
    fn breakdown_trims_category_names() {
        let transactions = vec![
            tx(1, 1, TransactionKind::Expense, "Food ", dec!(10)),
            tx(2, 2, TransactionKind::Expense, " Food", dec!(5)),
        ];
        let breakdown = CategoryBreakdown::from_transactions(
            &transactions,
            TransactionKind::Expense,
            &DateRange::default(),
            &Formatter::default(),
        );

        assert_eq!(breakdown.shares.len(), 1);
        assert_eq!(breakdown.shares[0].total, dec!(15));
        assert_eq!(breakdown.shares[0].percentage, dec!(100.00));
    }

    #[test]
    fn breakdown_of_other_kind_only() {
        let breakdown = CategoryBreakdown::from_transactions(
            &sample(),
            TransactionKind::Income,
            &DateRange::default(),
            &Formatter::default(),
        );

        assert_eq!(breakdown.total, dec!(3500.00));
        assert_eq!(breakdown.shares[0].category, "Salary");
        assert_eq!(breakdown.shares[1].category, "Freelance");
    }

    #[test]
    fn empty_or_zero_total_breakdown_has_no_shares() {
        let zero = vec![tx(1, 1, TransactionKind::Expense, "Food", dec!(0))];

        for transactions in [Vec::new(), zero] {
            let breakdown = CategoryBreakdown::from_transactions(
                &transactions,
                TransactionKind::Expense,
                &DateRange::default(),
                &Formatter::default(),
            );

            assert!(breakdown.is_empty());
            assert_eq!(breakdown.total, Decimal::ZERO);
        }
    }

    #[test]
    fn top_folds_remaining_shares_into_other() {
        let formatter = Formatter::default();
        let breakdown = CategoryBreakdown::from_transactions(
            &sample(),
            TransactionKind::Expense,
            &DateRange::default(),
            &formatter,
        )
        .top(2, &formatter);

        assert_eq!(breakdown.shares.len(), 3);
        assert_eq!(breakdown.shares[2].category, "Other");
        assert_eq!(breakdown.shares[2].total, dec!(100.00));
        assert_eq!(breakdown.shares[2].percentage, dec!(8.33));
        assert_eq!(breakdown.total, dec!(1200.00));
    }

    #[test]
    fn top_larger_than_share_count_changes_nothing() {
        let formatter = Formatter::default();
        let breakdown = CategoryBreakdown::from_transactions(
            &sample(),
            TransactionKind::Expense,
            &DateRange::default(),
            &formatter,
        );

        assert_eq!(breakdown.top(10, &formatter), breakdown);
    }
}
