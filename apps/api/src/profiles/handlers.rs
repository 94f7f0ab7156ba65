use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::UserProfileRow;
use crate::state::AppState;

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfileRow>, AppError> {
    let profile = state
        .profiles
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(profile))
}
