//! Client-side calculations for the finance tracker.
//!
//! This module holds the logic that runs without the API: the amount-entry
//! calculator and the dashboard aggregation that feeds the category chart.

pub mod calculator;
pub mod common;
pub mod dashboard;

pub use calculator::{AmountCalculator, CalculatorState, Display, Key, Operator, Phase};
pub use dashboard::{CategoryBreakdown, CategoryShare, DashboardSummary, DateRange};
