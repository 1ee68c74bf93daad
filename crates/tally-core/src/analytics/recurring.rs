//! Recurring-expense gap detection
//!
//! Finds expense categories the user pays regularly that have no
//! transaction yet in the current month. A category only qualifies when
//! it has at least one occurrence in the recent sub-window; stale
//! categories the user appears to have stopped using are not flagged.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{Transaction, TransactionKind};

use super::types::MissingExpense;
use super::month_start;

/// Days of history searched for recurring categories
pub const LOOKBACK_DAYS: i64 = 90;

/// A category must have an occurrence within this many days to count as
/// still recurring
pub const RECENT_DAYS: i64 = 60;

/// Detect recurring expense categories missing from the current month
pub fn missing_recurring_expenses(
    transactions: &[Transaction],
    reference: NaiveDate,
) -> Vec<MissingExpense> {
    let current_month_start = month_start(reference);
    let lookback_start = month_start(current_month_start - Duration::days(LOOKBACK_DAYS));
    let recent_start = month_start(current_month_start - Duration::days(RECENT_DAYS));

    // Partition lookback expenses by category; BTreeMap makes the output
    // category order deterministic.
    let mut by_category: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        if tx.kind == TransactionKind::Expense
            && tx.date >= lookback_start
            && tx.date < current_month_start
        {
            by_category.entry(tx.category.as_str()).or_default().push(tx);
        }
    }

    let mut gaps = Vec::new();
    for (category, mut history) in by_category {
        history.sort_by_key(|t| (t.date, t.id));

        let last_recent = match history.iter().rev().find(|t| t.date >= recent_start) {
            Some(tx) => *tx,
            None => continue,
        };

        let seen_this_month = transactions.iter().any(|t| {
            t.kind == TransactionKind::Expense
                && t.category == category
                && t.date >= current_month_start
        });
        if seen_this_month {
            continue;
        }

        let title = last_recent.title.as_deref().unwrap_or(category);
        gaps.push(MissingExpense {
            id: format!("missing-{}-{}", category, last_recent.id),
            title: title.to_string(),
            category: category.to_string(),
            amount: last_recent.amount,
            message: format!(
                "It looks like you haven't recorded an expense for **{}** ({}) \
                 yet this month. Your last recorded expense for this was ${:.2} on {}.",
                title,
                category,
                last_recent.amount,
                last_recent.date.format("%Y-%m-%d")
            ),
        });
    }

    gaps
}
