// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Registration and login hand out tokens; the rest are read-only lookups
// and request echo endpoints used by client developers.

pub mod item;
pub mod query_string;
pub mod test;
pub mod user;

pub use query_string::query_string_get;
