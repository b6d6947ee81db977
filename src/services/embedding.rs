//! Image feature extraction service client.

use async_trait::async_trait;
use axum::body::Bytes;
use serde::Deserialize;
use std::time::Duration;

use super::ServiceError;

/// One image submitted for feature extraction.
#[derive(Debug, Clone)]
pub struct ImageForEmbedding {
    /// Unique key echoed back by the service; sent as the part's file name.
    pub key: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Embedding {
    pub key: String,
    pub embedding: Vec<f32>,
}

impl Embedding {
    /// pgvector text literal.
    pub fn to_vector_literal(&self) -> String {
        // serde_json renders a Vec<f32> as `[a,b,c]`, which pgvector accepts.
        serde_json::to_string(&self.embedding).unwrap_or_else(|_| "[]".to_string())
    }
}

#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    async fn extract(&self, images: &[ImageForEmbedding]) -> Result<Vec<Embedding>, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    success: bool,
    data: Option<Vec<Embedding>>,
    msg: Option<String>,
}

/// Client for the CNN feature extraction endpoint.
pub struct CnnFeatureClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl CnnFeatureClient {
    pub fn new(http: reqwest::Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/cnn/extract_features", base_url.trim_end_matches('/')),
            timeout,
        }
    }
}

#[async_trait]
impl FeatureExtractor for CnnFeatureClient {
    async fn extract(&self, images: &[ImageForEmbedding]) -> Result<Vec<Embedding>, ServiceError> {
        let mut form = reqwest::multipart::Form::new();
        for image in images {
            let mut part = reqwest::multipart::Part::stream(image.bytes.clone()).file_name(image.key.clone());
            if let Some(content_type) = &image.content_type {
                part = part.mime_str(content_type)?;
            }
            form = form.part("files", part);
        }

        tracing::debug!("Calling embedding API with {} image(s)", images.len());
        let response: ExtractResponse = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?
            .json()
            .await?;

        match response {
            ExtractResponse { success: true, data: Some(data), .. } => Ok(data),
            ExtractResponse { msg, .. } => Err(ServiceError::Upstream(msg.unwrap_or_default())),
        }
    }
}
