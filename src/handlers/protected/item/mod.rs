pub mod upsert_item;

pub use upsert_item::upsert_item_post;
