use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Point-in-time copy of a `t_user` row, sealed inside issued tokens.
///
/// Only `id` may be trusted after a round trip through a token; everything
/// else can be stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserIdentitySnapshot {
    pub id: i64,
    pub nickname: Option<String>,
    pub phone_number: Option<String>,
    pub profile_img: Option<String>,
    pub addr: Option<String>,
    /// GeoJSON rendering of the PostGIS point.
    pub geo_point: Option<Value>,
    pub long: Option<f64>,
    pub lat: Option<f64>,
    pub created_dt: Option<DateTime<Utc>>,
    pub updated_dt: Option<DateTime<Utc>>,
    pub username: String,
    /// bcrypt hash; present only when loaded for login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub password: Option<String>,
}

impl UserIdentitySnapshot {
    /// Copy safe to hand back to the client.
    pub fn public(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }
}

/// Live user row plus the listings the user owns.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub nickname: Option<String>,
    pub phone_number: Option<String>,
    pub profile_img: Option<String>,
    pub addr: Option<String>,
    pub geo_point: Option<Value>,
    pub long: Option<f64>,
    pub lat: Option<f64>,
    pub created_dt: Option<DateTime<Utc>>,
    pub updated_dt: Option<DateTime<Utc>>,
    pub username: String,
    /// JSON array of `{ id, title, price, content, status, created_at, updated_at, item_images }`.
    pub items: Value,
}

/// Registration input after trimming.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub phone_number: String,
    pub addr: String,
    pub long: f64,
    pub lat: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> UserIdentitySnapshot {
        UserIdentitySnapshot {
            id: 3,
            nickname: Some("nick".into()),
            phone_number: None,
            profile_img: None,
            addr: Some("Seoul".into()),
            geo_point: None,
            long: Some(126.97),
            lat: Some(37.56),
            created_dt: None,
            updated_dt: None,
            username: "kim".into(),
            password: Some("$2b$10$hash".into()),
        }
    }

    #[test]
    fn public_copy_drops_password_hash() {
        let public = snapshot().public();
        assert_eq!(public.password, None);
        assert_eq!(public.username, "kim");
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn snapshot_without_password_field_deserializes() {
        let json = serde_json::json!({
            "id": 1, "nickname": null, "phone_number": null, "profile_img": null,
            "addr": null, "geo_point": null, "long": null, "lat": null,
            "created_dt": null, "updated_dt": null, "username": "lee"
        });
        let parsed: UserIdentitySnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.password, None);
        assert_eq!(parsed.id, 1);
    }
}
