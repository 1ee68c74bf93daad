//! Subscription handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::{AppError, AppState, CurrentUser};
use tally_core::models::{NewSubscription, Subscription};

/// GET /api/subscriptions - List subscriptions ordered by due date
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Subscription>>, AppError> {
    let subscriptions = state.db.list_subscriptions(user.0.id)?;
    Ok(Json(subscriptions))
}

/// POST /api/subscriptions - Track a subscription
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<NewSubscription>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = state.db.insert_subscription(user.0.id, &body)?;
    Ok(Json(serde_json::json!({ "id": id })))
}
