//! Request bodies submitted as HTML forms.
//!
//! Clients post the same fields either as `multipart/form-data` (when files
//! are attached) or `application/x-www-form-urlencoded`. [`FormBody`] accepts
//! both and exposes trimmed text fields plus the uploaded files.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ApiError;

/// Multipart field name carrying uploaded images.
pub const FILES_FIELD: &str = "files";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client supplied file name.
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Default)]
pub struct FormBody {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl FormBody {
    /// Trimmed value of a text field; empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn optional(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|v| !v.is_empty())
    }

    /// Trimmed value that must be present.
    pub fn required(&self, name: &str) -> Result<String, ApiError> {
        self.optional(name).ok_or_else(|| ApiError::missing_field(name))
    }

    /// Parse a field, falling back to the type's default when absent or unparsable.
    pub fn parse_or_default<T: FromStr + Default>(&self, name: &str) -> T {
        self.text(name).parse().unwrap_or_default()
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn into_files(self) -> Vec<UploadedFile> {
        self.files
    }

    fn insert_field(&mut self, name: String, value: String) {
        // first value wins
        self.fields.entry(name).or_insert(value);
    }

    async fn read_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut body = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);

            match file_name {
                Some(file_name) if name == FILES_FIELD => {
                    let bytes = field.bytes().await.map_err(|e| {
                        ApiError::bad_request(format!("Failed to read file {}: {}", file_name, e))
                    })?;
                    body.files.push(UploadedFile {
                        name: file_name,
                        content_type,
                        bytes,
                    });
                }
                Some(file_name) => {
                    tracing::debug!("Ignoring file {} in unexpected field {}", file_name, name);
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("Invalid field {}: {}", name, e)))?;
                    body.insert_field(name, value);
                }
            }
        }

        Ok(body)
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            return Self::read_multipart(multipart).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            let mut body = Self::default();
            for (name, value) in pairs {
                body.insert_field(name, value);
            }
            return Ok(body);
        }

        // Anything else carries no form fields.
        Ok(Self::default())
    }
}
