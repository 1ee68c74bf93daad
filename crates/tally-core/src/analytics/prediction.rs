//! Next-month expense prediction from trailing average spending

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{Transaction, TransactionKind};

use super::types::ExpensePrediction;
use super::{month_start, round2};

/// Days of history feeding the prediction, anchored at month boundaries
pub const LOOKBACK_DAYS: i64 = 90;

/// Estimate next month's total expenses
///
/// Averages lookback-window spending over the number of distinct months
/// that actually have expense data, so a window that starts mid-quarter
/// doesn't drag the estimate down.
pub fn predict_expense(transactions: &[Transaction], reference: NaiveDate) -> ExpensePrediction {
    let lookback_end = month_start(reference);
    let lookback_start = month_start(lookback_end - Duration::days(LOOKBACK_DAYS));

    let mut total = 0.0;
    let mut months_with_data: BTreeSet<(i32, u32)> = BTreeSet::new();

    for tx in transactions {
        if tx.kind == TransactionKind::Expense
            && tx.date >= lookback_start
            && tx.date < lookback_end
        {
            total += tx.amount;
            months_with_data.insert((tx.date.year(), tx.date.month()));
        }
    }

    // Floor of 1 guards the division; with zero total the prediction is
    // exactly zero rather than a rounding artifact.
    let month_count = months_with_data.len().max(1);

    let prediction = if total == 0.0 {
        0.0
    } else {
        round2(total / month_count as f64)
    };

    ExpensePrediction { prediction }
}
