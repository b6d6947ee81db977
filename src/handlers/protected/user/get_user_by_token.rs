// handlers/protected/user/get_user_by_token.rs - GET /api/user/get_user_by_token

use axum::{extract::State, Extension};

use crate::database::models::UserProfile;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/user/get_user_by_token - current profile with owned items
///
/// Looked up by the token's user id, so edits made after the token was
/// issued are visible.
pub async fn get_user_by_token(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<UserProfile> {
    let profile = state
        .users
        .find_profile(user.id())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(profile))
}
