//! Derived analytics handlers
//!
//! Each handler fetches the user's transaction (or goal) snapshot once
//! and hands it to the corresponding pure computation in tally-core.
//! All of them accept an optional `?date=YYYY-MM-DD` override for the
//! reference date, defaulting to today.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppError, AppState, CurrentUser};
use tally_core::analytics;
use tally_core::{
    CategoryBreakdown, ExpensePrediction, InsightReport, MissingExpense, MonthlySummary,
    SavingSuggestion,
};

/// Query parameters shared by the analytics endpoints
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Reference date override (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
}

fn resolve_reference(params: &AnalyticsQuery) -> Result<NaiveDate, AppError> {
    match params.date.as_deref() {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid 'date' format (use YYYY-MM-DD)")),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}

/// GET /api/monthly-summary - Trailing-months income vs. expense totals
pub async fn monthly_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<MonthlySummary>, AppError> {
    let reference = resolve_reference(&params)?;
    let snapshot = state.db.transaction_snapshot(user.0.id)?;
    Ok(Json(analytics::monthly_summary(&snapshot, reference)))
}

/// GET /api/category-analysis - Current-month spending per category
pub async fn category_analysis(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<CategoryBreakdown>, AppError> {
    let reference = resolve_reference(&params)?;
    let snapshot = state.db.transaction_snapshot(user.0.id)?;
    Ok(Json(analytics::category_analysis(&snapshot, reference)))
}

/// GET /api/smart-insights - Trend tip and anomaly flags
pub async fn smart_insights(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<InsightReport>, AppError> {
    let reference = resolve_reference(&params)?;
    let snapshot = state.db.transaction_snapshot(user.0.id)?;
    Ok(Json(analytics::smart_insights(&snapshot, reference)))
}

/// GET /api/predict-expense - Next-month expense estimate
pub async fn predict_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<ExpensePrediction>, AppError> {
    let reference = resolve_reference(&params)?;
    let snapshot = state.db.transaction_snapshot(user.0.id)?;
    Ok(Json(analytics::predict_expense(&snapshot, reference)))
}

/// GET /api/missing-expenses - Recurring expense categories missing this month
pub async fn missing_expenses(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<Vec<MissingExpense>>, AppError> {
    let reference = resolve_reference(&params)?;
    let snapshot = state.db.transaction_snapshot(user.0.id)?;
    Ok(Json(analytics::missing_recurring_expenses(
        &snapshot, reference,
    )))
}

/// GET /api/saving-suggestion - Weekly pacing suggestions for open goals
pub async fn saving_suggestion(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<Vec<SavingSuggestion>>, AppError> {
    let reference = resolve_reference(&params)?;
    let goals = state.db.list_goals(user.0.id)?;
    Ok(Json(analytics::saving_suggestions(&goals, reference)))
}
