//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, CurrentUser, MAX_PAGE_LIMIT};
use tally_core::models::{NewTransaction, Transaction, TransactionKind};
use tally_core::TransactionFilter;

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Filter by kind (income or expense)
    pub kind: Option<String>,
    /// Filter by category (exact match)
    pub category: Option<String>,
    /// Exclude categories (comma-separated)
    pub exclude: Option<String>,
    /// Inclusive start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    pub to: Option<String>,
    /// Sort direction for the date column (asc or desc, default desc)
    pub order: Option<String>,
}

fn default_limit() -> i64 {
    50
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub transactions: Vec<Transaction>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(&format!("Invalid '{}' date format (use YYYY-MM-DD)", field))
    })
}

/// GET /api/transactions - List transactions
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<TransactionResponse>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.max(1).min(MAX_PAGE_LIMIT);
    let offset = params.offset.max(0);

    let kind = params
        .kind
        .as_deref()
        .map(|k| {
            k.parse::<TransactionKind>()
                .map_err(|e| AppError::bad_request(&e))
        })
        .transpose()?;

    let from = params
        .from
        .as_deref()
        .map(|d| parse_date(d, "from"))
        .transpose()?;
    let to = params
        .to
        .as_deref()
        .map(|d| parse_date(d, "to"))
        .transpose()?;

    // Parse excluded categories from comma-separated string
    let excluded: Option<Vec<&str>> = params.exclude.as_deref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect()
    });

    let filter = TransactionFilter::new(user.0.id)
        .kind(kind)
        .category(params.category.as_deref())
        .exclude_categories(excluded.as_deref())
        .date_from(from)
        .date_through(to)
        .sort_order(params.order.as_deref());
    let transactions = state.db.list_transactions(filter, limit, offset)?;

    let count_filter = TransactionFilter::new(user.0.id)
        .kind(kind)
        .category(params.category.as_deref())
        .exclude_categories(excluded.as_deref())
        .date_from(from)
        .date_through(to);
    let total = state.db.count_transactions(count_filter)?;

    Ok(Json(TransactionResponse {
        transactions,
        total,
        limit,
        offset,
    }))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<NewTransaction>,
) -> Result<Json<Transaction>, AppError> {
    let id = state
        .db
        .insert_transaction(user.0.id, &body)
        .map_err(AppError::from_core)?;

    let transaction = state
        .db
        .get_transaction(user.0.id, id)?
        .ok_or_else(|| AppError::not_found("Transaction not found after insert"))?;

    Ok(Json(transaction))
}

/// GET /api/transactions/:id - Fetch a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state
        .db
        .get_transaction(user.0.id, id)?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;
    Ok(Json(transaction))
}

/// PUT /api/transactions/:id - Replace a transaction's fields
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<NewTransaction>,
) -> Result<Json<Transaction>, AppError> {
    let updated = state
        .db
        .update_transaction(user.0.id, id, &body)
        .map_err(AppError::from_core)?;
    if !updated {
        return Err(AppError::not_found("Transaction not found"));
    }

    let transaction = state
        .db
        .get_transaction(user.0.id, id)?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;
    Ok(Json(transaction))
}

/// DELETE /api/transactions/:id - Remove a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state.db.delete_transaction(user.0.id, id)?;
    if !deleted {
        return Err(AppError::not_found("Transaction not found"));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
