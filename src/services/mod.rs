pub mod embedding;
pub mod image_host;

pub use embedding::{CnnFeatureClient, Embedding, FeatureExtractor, ImageForEmbedding};
pub use image_host::{upload_all, ImageHost, ImgBbClient, UploadOutcome, UploadStatus};

use thiserror::Error;

/// Failures talking to an upstream HTTP service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream rejected the request: {0}")]
    Upstream(String),
}

/// Shared outbound HTTP client
pub fn http_client() -> Result<reqwest::Client, ServiceError> {
    Ok(reqwest::Client::builder()
        .gzip(true)
        .user_agent(concat!("marketplace-api/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
