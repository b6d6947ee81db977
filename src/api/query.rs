//! Raw query string access for parameters that may repeat.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Decoded `key=value` pairs in request order.
#[derive(Debug, Default, Clone)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn parse(query: &str) -> Self {
        Self(
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// First value for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, also accepting the `key[]` spelling.
    pub fn all(&self, key: &str) -> Vec<String> {
        let bracketed = format!("{}[]", key);
        self.0
            .iter()
            .filter(|(k, _)| k == key || *k == bracketed)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryPairs
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .uri
            .query()
            .map(QueryPairs::parse)
            .unwrap_or_default())
    }
}
