pub mod embeddings;
pub mod items;
pub mod manager;
pub mod models;
pub mod users;

pub use embeddings::EmbeddingRepository;
pub use items::{ItemRepository, ItemStore};
pub use manager::{DatabaseError, DatabaseManager};
pub use users::{UserRepository, UserStore};
