//! Transaction filter builder for constructing dynamic SQL queries
//!
//! This module provides a builder pattern for constructing WHERE clauses
//! and related SQL components for transaction queries. Every query is
//! scoped to a single user.

use chrono::NaiveDate;

use crate::models::TransactionKind;

/// Builder for constructing transaction query filters
///
/// Date bounds are split into inclusive/exclusive variants because the
/// analytics windows mix both (e.g. "from month start" is inclusive while
/// "before current month start" is exclusive).
///
/// The lifetime `'query` represents how long the filter parameters
/// (category names) must remain valid.
pub struct TransactionFilter<'query> {
    pub user_id: i64,
    pub kind: Option<TransactionKind>,
    pub category: Option<&'query str>,
    pub exclude_categories: Option<&'query [&'query str]>,
    /// date >= bound
    pub date_from: Option<NaiveDate>,
    /// date < bound
    pub date_before: Option<NaiveDate>,
    /// date <= bound
    pub date_through: Option<NaiveDate>,
    pub sort_order: Option<&'query str>,
}

/// Result of building a filter - contains SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including "WHERE" keyword
    pub where_clause: String,
    /// ORDER BY clause including "ORDER BY" keyword
    pub order_clause: String,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl<'query> TransactionFilter<'query> {
    /// Create a new filter builder scoped to a user
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            kind: None,
            category: None,
            exclude_categories: None,
            date_from: None,
            date_before: None,
            date_through: None,
            sort_order: None,
        }
    }

    /// Restrict to a transaction kind
    pub fn kind(mut self, kind: Option<TransactionKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Restrict to a single category (exact match)
    pub fn category(mut self, category: Option<&'query str>) -> Self {
        self.category = category;
        self
    }

    /// Exclude a set of categories
    pub fn exclude_categories(mut self, categories: Option<&'query [&'query str]>) -> Self {
        self.exclude_categories = categories;
        self
    }

    /// Inclusive lower date bound (date >= from)
    pub fn date_from(mut self, from: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self
    }

    /// Exclusive upper date bound (date < before)
    pub fn date_before(mut self, before: Option<NaiveDate>) -> Self {
        self.date_before = before;
        self
    }

    /// Inclusive upper date bound (date <= through)
    pub fn date_through(mut self, through: Option<NaiveDate>) -> Self {
        self.date_through = through;
        self
    }

    /// Sort order for the date column ("asc" or "desc", default desc)
    pub fn sort_order(mut self, order: Option<&'query str>) -> Self {
        self.sort_order = order;
        self
    }

    /// Build the filter components
    pub fn build(self) -> FilterResult {
        let mut conditions = vec!["t.user_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(self.user_id)];

        if let Some(kind) = self.kind {
            conditions.push("t.kind = ?".to_string());
            params.push(Box::new(kind.as_str()));
        }

        if let Some(category) = self.category {
            conditions.push("t.category = ?".to_string());
            params.push(Box::new(category.to_string()));
        }

        if let Some(excluded) = self.exclude_categories {
            if !excluded.is_empty() {
                let placeholders: Vec<String> =
                    excluded.iter().map(|_| "?".to_string()).collect();
                conditions.push(format!("t.category NOT IN ({})", placeholders.join(", ")));
                for category in excluded {
                    params.push(Box::new(category.to_string()));
                }
            }
        }

        if let Some(from) = self.date_from {
            conditions.push("t.date >= ?".to_string());
            params.push(Box::new(from.to_string()));
        }

        if let Some(before) = self.date_before {
            conditions.push("t.date < ?".to_string());
            params.push(Box::new(before.to_string()));
        }

        if let Some(through) = self.date_through {
            conditions.push("t.date <= ?".to_string());
            params.push(Box::new(through.to_string()));
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));

        let order_dir = match self.sort_order {
            Some("asc") => "ASC",
            _ => "DESC",
        };
        // Secondary id ordering keeps results stable for same-day transactions
        let order_clause = format!("ORDER BY t.date {}, t.id {}", order_dir, order_dir);

        FilterResult {
            where_clause,
            order_clause,
            params,
        }
    }
}

impl FilterResult {
    /// Build a COUNT query
    pub fn build_count_query(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM transactions t {}",
            self.where_clause
        )
    }

    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}
