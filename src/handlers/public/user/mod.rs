// handlers/public/user/mod.rs - Token acquisition

use serde::Serialize;

use crate::database::models::UserIdentitySnapshot;

pub mod login;
pub mod register;

pub use login::login_post;
pub use register::register_post;

/// Body returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user_info: UserIdentitySnapshot,
    pub token: String,
}
