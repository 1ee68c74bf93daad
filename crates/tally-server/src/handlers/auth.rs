//! Current-user handler

use axum::{Extension, Json};

use crate::{AppError, CurrentUser};
use tally_core::models::User;

/// GET /api/me - The authenticated user
///
/// The token field is never serialized, so this is safe to return as-is.
pub async fn get_me(Extension(user): Extension<CurrentUser>) -> Result<Json<User>, AppError> {
    Ok(Json(user.0))
}
