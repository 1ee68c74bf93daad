//! Bill handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::{AppError, AppState, CurrentUser};
use tally_core::models::{Bill, NewBill};

/// GET /api/bills - List bills ordered by due date
pub async fn list_bills(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Bill>>, AppError> {
    let bills = state.db.list_bills(user.0.id)?;
    Ok(Json(bills))
}

/// POST /api/bills - Track a bill
pub async fn create_bill(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<NewBill>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = state.db.insert_bill(user.0.id, &body)?;
    Ok(Json(serde_json::json!({ "id": id })))
}
