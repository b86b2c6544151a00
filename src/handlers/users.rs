use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Serialize)]
pub struct UserDetails {
    pub name: String,
    pub username: String,
    pub email: String,
}

/// GET /api/user - profile of the authenticated user
pub async fn user_details(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserDetails>, ApiError> {
    let Some(record) = state.users.get(user.user_id).await? else {
        tracing::warn!("Token for {} names unknown user {}", user.username, user.user_id);
        return Err(ApiError::NotFound);
    };

    Ok(Json(UserDetails {
        name: record.display_name,
        username: record.username,
        email: record.email,
    }))
}
