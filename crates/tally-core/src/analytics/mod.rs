//! Derived analytics over a user's record snapshot
//!
//! Each component is a pure function of an immutable snapshot plus a
//! reference date: no side effects, no shared state, and graceful
//! degradation to empty/zero results on sparse data.
//!
//! - `monthly_summary` - Income vs. expense totals for the trailing months
//! - `categories` - Current-month spending per category
//! - `insights` - Trend tip and abnormally large expense detection
//! - `prediction` - Next-month expense estimate from a trailing window
//! - `recurring` - Recurring expense categories missing this month
//! - `savings` - Weekly savings pace needed to reach each goal

pub mod categories;
pub mod insights;
pub mod monthly_summary;
pub mod prediction;
pub mod recurring;
pub mod savings;
pub mod types;

pub use categories::category_analysis;
pub use insights::smart_insights;
pub use monthly_summary::monthly_summary;
pub use prediction::predict_expense;
pub use recurring::missing_recurring_expenses;
pub use savings::saving_suggestions;
pub use types::{
    CategoryBreakdown, ExpensePrediction, InsightReport, MissingExpense, MonthTotal,
    MonthlySummary, SavingSuggestion, SpendingAnomaly,
};

use chrono::{Datelike, NaiveDate};

/// First day of the calendar month containing `date`
pub(crate) fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

/// First day of the calendar month before the one containing `date`
pub(crate) fn prev_month_start(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    if start.month() == 1 {
        NaiveDate::from_ymd_opt(start.year() - 1, 12, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() - 1, 1).unwrap()
    }
}

/// Round a monetary value to 2 decimal places, half-up
///
/// Amounts in this domain are non-negative, so rounding half away from
/// zero is the same as rounding half up.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
