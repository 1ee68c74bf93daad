//! Current-month spending breakdown by category

use chrono::NaiveDate;

use crate::models::{Transaction, TransactionKind};

use super::types::CategoryBreakdown;
use super::{month_start, round2};

/// Sum current-month expenses per category
///
/// The window is lower-bounded at the start of the reference month and
/// deliberately has no upper bound, so expenses dated later in the month
/// than the reference date are still counted.
pub fn category_analysis(transactions: &[Transaction], reference: NaiveDate) -> CategoryBreakdown {
    let current_month_start = month_start(reference);

    let mut totals = CategoryBreakdown::new();
    for tx in transactions {
        if tx.kind == TransactionKind::Expense && tx.date >= current_month_start {
            *totals.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
        }
    }

    for total in totals.values_mut() {
        *total = round2(*total);
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, amount: f64, category: &str, date: &str) -> Transaction {
        Transaction {
            id,
            user_id: 1,
            title: None,
            amount,
            kind: TransactionKind::Expense,
            category: category.to_string(),
            date: date.parse().unwrap(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_totals_per_category() {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = vec![
            expense(1, 40.0, "groceries", "2024-03-02"),
            expense(2, 60.0, "groceries", "2024-03-10"),
            expense(3, 25.0, "transport", "2024-03-12"),
        ];

        let totals = category_analysis(&transactions, reference);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals["groceries"], 100.0);
        assert_eq!(totals["transport"], 25.0);
    }

    #[test]
    fn test_future_dated_within_month_counted() {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = vec![expense(1, 80.0, "rent", "2024-03-28")];

        let totals = category_analysis(&transactions, reference);
        assert_eq!(totals["rent"], 80.0);
    }

    #[test]
    fn test_prior_month_and_income_excluded() {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut income = expense(1, 500.0, "salary", "2024-03-01");
        income.kind = TransactionKind::Income;
        let transactions = vec![income, expense(2, 75.0, "groceries", "2024-02-20")];

        let totals = category_analysis(&transactions, reference);
        assert!(totals.is_empty());
    }

    #[test]
    fn test_category_sum_matches_total_expense() {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = vec![
            expense(1, 10.10, "a", "2024-03-01"),
            expense(2, 20.20, "b", "2024-03-02"),
            expense(3, 30.30, "c", "2024-03-03"),
            expense(4, 40.40, "a", "2024-03-04"),
        ];

        let totals = category_analysis(&transactions, reference);
        let sum: f64 = totals.values().sum();
        assert!((sum - 101.0).abs() < 1e-9);
    }
}
