use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

/// A listing with its category, location, embedding and images.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ItemDetail {
    pub item_id: i64,
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub price: Option<i64>,
    pub status: Option<String>,
    pub addr: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub geo_point: Option<Value>,
    pub embedding: Option<Value>,
    /// JSON array of `{ img_id, url, created_dt }`.
    pub images: Value,
}

/// Fields written by insert and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub category_id: i64,
    pub title: String,
    pub content: String,
    pub price: i64,
}
