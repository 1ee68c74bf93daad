//! Savings goal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, CurrentUser};
use tally_core::models::{Goal, NewGoal};

/// GET /api/goals - List the user's goals
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Goal>>, AppError> {
    let goals = state.db.list_goals(user.0.id)?;
    Ok(Json(goals))
}

/// POST /api/goals - Create a goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<NewGoal>,
) -> Result<Json<Goal>, AppError> {
    let id = state
        .db
        .insert_goal(user.0.id, &body)
        .map_err(AppError::from_core)?;

    let goal = state
        .db
        .get_goal(user.0.id, id)?
        .ok_or_else(|| AppError::not_found("Goal not found after insert"))?;
    Ok(Json(goal))
}

/// GET /api/goals/:id - Fetch a single goal
pub async fn get_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<Goal>, AppError> {
    let goal = state
        .db
        .get_goal(user.0.id, id)?
        .ok_or_else(|| AppError::not_found("Goal not found"))?;
    Ok(Json(goal))
}

/// Body for updating the saved amount on a goal
#[derive(Debug, Deserialize)]
pub struct GoalSavedUpdate {
    pub saved_amount: f64,
}

/// PATCH /api/goals/:id - Update the amount saved toward a goal
pub async fn update_goal_saved_amount(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<GoalSavedUpdate>,
) -> Result<Json<Goal>, AppError> {
    if !body.saved_amount.is_finite() || body.saved_amount < 0.0 {
        return Err(AppError::bad_request(
            "Saved amount must be a non-negative number",
        ));
    }

    let updated = state
        .db
        .update_goal_saved_amount(user.0.id, id, body.saved_amount)?;
    if !updated {
        return Err(AppError::not_found("Goal not found"));
    }

    let goal = state
        .db
        .get_goal(user.0.id, id)?
        .ok_or_else(|| AppError::not_found("Goal not found"))?;
    Ok(Json(goal))
}

/// DELETE /api/goals/:id - Remove a goal
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state.db.delete_goal(user.0.id, id)?;
    if !deleted {
        return Err(AppError::not_found("Goal not found"));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
