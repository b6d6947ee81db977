pub mod embedding;
pub mod item;
pub mod user;

pub use embedding::NewImageEmbedding;
pub use item::{ItemDetail, ItemDraft};
pub use user::{NewUser, UserIdentitySnapshot, UserProfile};
