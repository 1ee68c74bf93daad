//! Monthly income vs. expense aggregation
//!
//! Buckets transactions into the trailing six calendar months ending at
//! the reference month. Months with no data report zero sums rather than
//! being absent, so chart axes stay aligned.

use chrono::{Datelike, NaiveDate};

use crate::models::{Transaction, TransactionKind};

use super::types::{MonthTotal, MonthlySummary};
use super::{month_start, prev_month_start, round2};

/// Number of trailing months in the summary, reference month included
pub const SUMMARY_MONTHS: usize = 6;

/// Compute the trailing-months summary, oldest month first
pub fn monthly_summary(transactions: &[Transaction], reference: NaiveDate) -> MonthlySummary {
    // Walk backward from the reference month, then reverse so the output
    // runs oldest to newest.
    let mut starts = Vec::with_capacity(SUMMARY_MONTHS);
    let mut cursor = month_start(reference);
    for _ in 0..SUMMARY_MONTHS {
        starts.push(cursor);
        cursor = prev_month_start(cursor);
    }
    starts.reverse();

    let months = starts
        .into_iter()
        .map(|start| {
            let mut income = 0.0;
            let mut expense = 0.0;
            for tx in transactions {
                if tx.date.year() == start.year() && tx.date.month() == start.month() {
                    match tx.kind {
                        TransactionKind::Income => income += tx.amount,
                        TransactionKind::Expense => expense += tx.amount,
                    }
                }
            }
            MonthTotal {
                label: start.format("%b %Y").to_string(),
                income: round2(income),
                expense: round2(expense),
            }
        })
        .collect();

    MonthlySummary { months }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i64, kind: TransactionKind, amount: f64, date: &str) -> Transaction {
        Transaction {
            id,
            user_id: 1,
            title: Some(format!("tx {}", id)),
            amount,
            kind,
            category: "misc".to_string(),
            date: date.parse().unwrap(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_always_six_months_oldest_first() {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let summary = monthly_summary(&[], reference);

        assert_eq!(summary.months.len(), SUMMARY_MONTHS);
        assert_eq!(summary.months[0].label, "Oct 2023");
        assert_eq!(summary.months[5].label, "Mar 2024");
        for month in &summary.months {
            assert_eq!(month.income, 0.0);
            assert_eq!(month.expense, 0.0);
        }
    }

    #[test]
    fn test_sums_partitioned_by_kind() {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = vec![
            tx(1, TransactionKind::Income, 2500.0, "2024-03-01"),
            tx(2, TransactionKind::Expense, 120.50, "2024-03-05"),
            tx(3, TransactionKind::Expense, 79.50, "2024-03-20"),
            tx(4, TransactionKind::Expense, 300.0, "2024-02-10"),
        ];

        let summary = monthly_summary(&transactions, reference);

        let march = &summary.months[5];
        assert_eq!(march.label, "Mar 2024");
        assert_eq!(march.income, 2500.0);
        assert_eq!(march.expense, 200.0);

        let february = &summary.months[4];
        assert_eq!(february.label, "Feb 2024");
        assert_eq!(february.income, 0.0);
        assert_eq!(february.expense, 300.0);
    }

    #[test]
    fn test_transactions_outside_window_ignored() {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = vec![
            // September 2023 is one month before the six-month window opens
            tx(1, TransactionKind::Expense, 999.0, "2023-09-30"),
            tx(2, TransactionKind::Expense, 50.0, "2023-10-01"),
        ];

        let summary = monthly_summary(&transactions, reference);

        assert_eq!(summary.months[0].label, "Oct 2023");
        assert_eq!(summary.months[0].expense, 50.0);
        let total: f64 = summary.months.iter().map(|m| m.expense).sum();
        assert_eq!(total, 50.0);
    }

    #[test]
    fn test_year_boundary_labels() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let summary = monthly_summary(&[], reference);

        let labels: Vec<&str> = summary.months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Aug 2023", "Sep 2023", "Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024"]
        );
    }
}
