// handlers/public/user/register.rs - POST /api/user/register

use axum::extract::State;

use super::SessionData;
use crate::api::FormBody;
use crate::auth::hash_password_blocking;
use crate::database::models::NewUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::upload_all;
use crate::state::AppState;

/// POST /api/user/register - create an account and sign it in
///
/// Accepts a form body with `username`, `password`, `nickname`,
/// `phone_number`, `addr`, `long`, `lat` and optional `files`. The first
/// image that uploads successfully becomes the profile picture.
///
/// Expected Output:
/// ```json
/// { "success": true, "data": { "userInfo": { "id": 1, ... }, "token": "Bearer eyJ..." } }
/// ```
pub async fn register_post(State(state): State<AppState>, form: FormBody) -> ApiResult<SessionData> {
    let username = form.required("username")?;
    let password = form.required("password")?;

    let password_hash = hash_password_blocking(password, state.config.security.bcrypt_cost).await?;

    let new_user = NewUser {
        username,
        password_hash,
        nickname: form.text("nickname"),
        phone_number: form.text("phone_number"),
        addr: form.text("addr"),
        long: form.parse_or_default("long"),
        lat: form.parse_or_default("lat"),
    };

    let user_id = state.users.insert(&new_user).await.map_err(|e| match ApiError::from(e) {
        ApiError::Conflict(_) => ApiError::conflict("Username is already taken"),
        other => other,
    })?;
    tracing::info!("Registered user id={} username={}", user_id, new_user.username);

    let files = form.into_files();
    if !files.is_empty() {
        let outcomes = upload_all(
            state.image_host.as_ref(),
            files.iter().map(|f| (f.name.as_str(), f.bytes.as_ref())),
        )
        .await;

        if let Some(url) = outcomes.iter().find_map(|o| o.hosted_url()) {
            state.users.set_profile_img(user_id, url).await?;
        }
    }

    let snapshot = state
        .users
        .find_snapshot(user_id)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Registered user could not be read back"))?;

    let token = state.envelope.issue(&snapshot)?;

    Ok(ApiResponse::success(SessionData {
        user_info: snapshot,
        token,
    }))
}
