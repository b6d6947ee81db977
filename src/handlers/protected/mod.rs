// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `middleware::require_identity`, which puts an
// `AuthUser` snapshot into the request extensions. Handlers trust only its
// `id` and re-read anything else they need.

pub mod item;
pub mod user;
