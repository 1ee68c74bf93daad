//! Personal reminder handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, CurrentUser};
use tally_core::models::{NewReminder, Reminder, ReminderUpdate};

/// Query parameters for listing reminders
#[derive(Debug, Deserialize)]
pub struct ReminderQuery {
    /// Include completed reminders (default: only open ones)
    #[serde(default)]
    pub include_completed: bool,
}

/// GET /api/reminders - List reminders ordered by due date
pub async fn list_reminders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ReminderQuery>,
) -> Result<Json<Vec<Reminder>>, AppError> {
    let reminders = state
        .db
        .list_reminders(user.0.id, params.include_completed)?;
    Ok(Json(reminders))
}

/// POST /api/reminders - Create a reminder
pub async fn create_reminder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<NewReminder>,
) -> Result<Json<Reminder>, AppError> {
    let id = state.db.insert_reminder(user.0.id, &body)?;
    let reminder = state
        .db
        .get_reminder(user.0.id, id)?
        .ok_or_else(|| AppError::not_found("Reminder not found after insert"))?;
    Ok(Json(reminder))
}

/// GET /api/reminders/:id - Fetch a single reminder
pub async fn get_reminder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<Reminder>, AppError> {
    let reminder = state
        .db
        .get_reminder(user.0.id, id)?
        .ok_or_else(|| AppError::not_found("Reminder not found"))?;
    Ok(Json(reminder))
}

/// PATCH /api/reminders/:id - Partially update a reminder
pub async fn update_reminder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<ReminderUpdate>,
) -> Result<Json<Reminder>, AppError> {
    let reminder = state
        .db
        .update_reminder(user.0.id, id, &body)?
        .ok_or_else(|| AppError::not_found("Reminder not found"))?;
    Ok(Json(reminder))
}

/// DELETE /api/reminders/:id - Remove a reminder
pub async fn delete_reminder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state.db.delete_reminder(user.0.id, id)?;
    if !deleted {
        return Err(AppError::not_found("Reminder not found"));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
