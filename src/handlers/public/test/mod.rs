// handlers/public/test/mod.rs - Request echo endpoints and the image
// embedding pipeline


pub use echo::{formdata_body_post, header_get, json_body_post, query_string_array_get};
pub use imgembed_upload::imgembed_upload_post;
