//! Result records produced by the analytics components
//!
//! All of these serialize directly to the JSON shapes the API returns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    /// Human-readable month label, e.g. "Mar 2024"
    pub label: String,
    pub income: f64,
    pub expense: f64,
}

/// Trailing-months income vs. expense summary, oldest month first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub months: Vec<MonthTotal>,
}

/// Current-month expense totals keyed by category
///
/// BTreeMap keeps the category order deterministic (sorted by name).
/// Categories with no current-month expenses are omitted, not zeroed.
pub type CategoryBreakdown = BTreeMap<String, f64>;

/// An abnormally large expense transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnomaly {
    pub id: i64,
    pub title: String,
    pub message: String,
}

/// Trend tip plus anomaly flags for the current month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub saving_tip: String,
    pub anomalies: Vec<SpendingAnomaly>,
}

/// Estimated total expenses for next month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensePrediction {
    pub prediction: f64,
}

/// A recurring expense category with no transaction yet this month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingExpense {
    /// Synthetic id: "missing-{category}-{reference transaction id}"
    pub id: String,
    pub title: String,
    pub category: String,
    /// Amount of the last known transaction in this category
    pub amount: f64,
    pub message: String,
}

/// A savings pacing suggestion for one unmet goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingSuggestion {
    pub id: i64,
    pub title: String,
    pub message: String,
}
