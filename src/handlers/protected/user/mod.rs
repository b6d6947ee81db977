pub mod get_user_by_token;

pub use get_user_by_token::get_user_by_token;
