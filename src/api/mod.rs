pub mod form;
pub mod query;

pub use form::{FormBody, UploadedFile, FILES_FIELD};
pub use query::QueryPairs;
