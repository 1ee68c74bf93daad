//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance backend:
//! - Database access and migrations
//! - Domain models (transactions, goals, subscriptions, bills, reminders)
//! - Derived analytics (monthly summaries, category breakdowns, insights,
//!   expense prediction, recurring-expense gaps, savings pacing)
//! - Transaction CSV export

pub mod analytics;
pub mod db;
pub mod error;
pub mod export;
pub mod models;

pub use analytics::{
    CategoryBreakdown, ExpensePrediction, InsightReport, MissingExpense, MonthlySummary,
    MonthTotal, SavingSuggestion, SpendingAnomaly,
};
pub use db::{Database, TransactionFilter};
pub use error::{Error, Result};
pub use export::write_transactions_csv;
