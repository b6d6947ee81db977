//! Image hosting (ImgBB).

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// Per-file result of an upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Host accepted the image.
    Success,
    /// Host answered but refused the image.
    Fail,
    /// Transport or decoding error.
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub status: UploadStatus,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn success(filename: impl Into<String>, url: String, delete_url: Option<String>) -> Self {
        Self {
            status: UploadStatus::Success,
            filename: filename.into(),
            url: Some(url),
            delete_url,
            error: None,
        }
    }

    pub fn fail(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Fail,
            filename: filename.into(),
            url: None,
            delete_url: None,
            error: Some(error.into()),
        }
    }

    pub fn error(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Error,
            filename: filename.into(),
            url: None,
            delete_url: None,
            error: Some(error.into()),
        }
    }

    /// URL of a successful upload.
    pub fn hosted_url(&self) -> Option<&str> {
        match self.status {
            UploadStatus::Success => self.url.as_deref(),
            _ => None,
        }
    }
}

/// Stores an image somewhere publicly reachable.
///
/// Implementations report failure through [`UploadOutcome`] rather than an
/// error, so one bad file never aborts a batch.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, name: &str, bytes: &[u8]) -> UploadOutcome;
}

/// Upload every file concurrently, preserving input order.
pub async fn upload_all<'a, I>(host: &dyn ImageHost, files: I) -> Vec<UploadOutcome>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let outcomes = join_all(files.into_iter().map(|(name, bytes)| host.upload(name, bytes))).await;

    let failed: Vec<&UploadOutcome> = outcomes
        .iter()
        .filter(|o| o.status != UploadStatus::Success)
        .collect();
    if !failed.is_empty() {
        tracing::warn!("{} of {} image uploads failed: {:?}", failed.len(), outcomes.len(), failed);
    }

    outcomes
}

#[derive(Debug, Deserialize)]
struct ImgBbResponse {
    #[serde(default)]
    success: bool,
    data: Option<ImgBbImage>,
    error: Option<ImgBbError>,
}

#[derive(Debug, Deserialize)]
struct ImgBbImage {
    url: String,
    delete_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImgBbError {
    message: Option<String>,
}

/// ImgBB upload API client.
pub struct ImgBbClient {
    http: reqwest::Client,
    api_key: String,
    upload_url: String,
}

impl ImgBbClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, upload_url: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            upload_url: upload_url.into(),
        }
    }
}

#[async_trait]
impl ImageHost for ImgBbClient {
    async fn upload(&self, name: &str, bytes: &[u8]) -> UploadOutcome {
        let form = reqwest::multipart::Form::new()
            .text("key", self.api_key.clone())
            .text("image", STANDARD.encode(bytes))
            .text("name", name.to_string());

        let response = match self.http.post(&self.upload_url).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("ImgBB request for {} failed: {}", name, e);
                return UploadOutcome::error(name, e.to_string());
            }
        };

        let body: ImgBbResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("ImgBB response for {} was not JSON: {}", name, e);
                return UploadOutcome::error(name, e.to_string());
            }
        };

        match body {
            ImgBbResponse { success: true, data: Some(image), .. } => {
                UploadOutcome::success(name, image.url, image.delete_url)
            }
            ImgBbResponse { error, .. } => {
                let message = error
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| "Unknown error".to_string());
                tracing::error!("ImgBB rejected {}: {}", name, message);
                UploadOutcome::fail(name, message)
            }
        }
    }
}
