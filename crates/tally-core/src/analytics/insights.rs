//! Spending trend tip and anomaly detection

use chrono::NaiveDate;

use crate::models::{Transaction, TransactionKind};

use super::types::{InsightReport, SpendingAnomaly};
use super::month_start;

/// Expense transactions above this amount are candidates for anomaly flags
pub const ANOMALY_THRESHOLD: f64 = 200.0;

/// Categories where large amounts are expected and never flagged
pub const EXEMPT_CATEGORIES: [&str; 4] = ["rent", "mortgage", "loan repayment", "salary"];

/// Fallback display title for transactions without one
const UNKNOWN_EXPENSE: &str = "Unknown Expense";

/// Compare current vs. prior month spending and flag unusually large expenses
pub fn smart_insights(transactions: &[Transaction], reference: NaiveDate) -> InsightReport {
    let current_month_start = month_start(reference);
    let last_month_start = super::prev_month_start(current_month_start);

    let current_month_expenses: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && t.date >= current_month_start)
        .map(|t| t.amount)
        .sum();

    let last_month_expenses: f64 = transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionKind::Expense
                && t.date >= last_month_start
                && t.date < current_month_start
        })
        .map(|t| t.amount)
        .sum();

    // First match wins: increasing spend, spending started, default.
    let saving_tip = if last_month_expenses > 0.0
        && current_month_expenses > last_month_expenses * 1.2
    {
        "Your spending is increasing! Try to cut back on discretionary expenses this month."
    } else if last_month_expenses <= 0.0 && current_month_expenses > 0.0 {
        "You've started spending this month. Keep an eye on your budget!"
    } else {
        "You're on track to meet your goals!"
    };

    let mut anomalies: Vec<SpendingAnomaly> = transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionKind::Expense
                && t.date >= current_month_start
                && t.amount > ANOMALY_THRESHOLD
                && !EXEMPT_CATEGORIES.contains(&t.category.as_str())
        })
        .map(|t| {
            let title = t.title.as_deref().unwrap_or(UNKNOWN_EXPENSE);
            SpendingAnomaly {
                id: t.id,
                title: title.to_string(),
                message: format!(
                    "Unusually high expense detected: ${:.2} for {} ({}).",
                    t.amount, title, t.category
                ),
            }
        })
        .collect();

    // Ascending id keeps the report reproducible regardless of input order
    anomalies.sort_by_key(|a| a.id);

    InsightReport {
        saving_tip: saving_tip.to_string(),
        anomalies,
    }
}
