// handlers/public/user/login.rs - POST /api/user/login

use axum::extract::State;

use super::SessionData;
use crate::api::FormBody;
use crate::auth::verify_password_blocking;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

// Same text for unknown user and wrong password.
const LOGIN_FAILED: &str = "User not found or password does not match";

/// POST /api/user/login - exchange credentials for a bearer token
///
/// The token carries the full row including the password hash, as earlier
/// clients expect; `userInfo` in the response never does.
pub async fn login_post(State(state): State<AppState>, form: FormBody) -> ApiResult<SessionData> {
    let username = form.text("username");
    let password = form.text("password");

    let user = state
        .users
        .find_for_login(&username)
        .await?
        .ok_or_else(|| {
            tracing::info!("Login for unknown username {}", username);
            ApiError::unauthorized(LOGIN_FAILED)
        })?;

    let stored_hash = user.password.clone().unwrap_or_default();
    if !verify_password_blocking(password, stored_hash).await? {
        tracing::info!("Password mismatch for user id={}", user.id);
        return Err(ApiError::unauthorized(LOGIN_FAILED));
    }

    let token = state.envelope.issue(&user)?;
    tracing::info!("User id={} logged in", user.id);

    Ok(ApiResponse::success(SessionData {
        user_info: user.public(),
        token,
    }))
}
