pub mod get_item_by_id;

pub use get_item_by_id::get_item_by_id;
