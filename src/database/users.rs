use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::{NewUser, UserIdentitySnapshot, UserProfile};

const SNAPSHOT_COLUMNS: &str = r#"
    u.id::int8 AS id,
    u.nickname,
    u.phone_number,
    u.profile_img,
    u.addr,
    ST_AsGeoJSON(u.geo_point)::json AS geo_point,
    u.long::float8 AS long,
    u.lat::float8 AS lat,
    u.created_dt::timestamptz AS created_dt,
    u.updated_dt::timestamptz AS updated_dt,
    u.username
"#;

/// User persistence used by the handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return the new id. A taken username is
    /// [`DatabaseError::Duplicate`].
    async fn insert(&self, user: &NewUser) -> Result<i64, DatabaseError>;

    async fn set_profile_img(&self, id: i64, url: &str) -> Result<(), DatabaseError>;

    /// Snapshot without the password hash.
    async fn find_snapshot(&self, id: i64) -> Result<Option<UserIdentitySnapshot>, DatabaseError>;

    /// Snapshot including the stored password hash, for credential checks.
    async fn find_for_login(&self, username: &str) -> Result<Option<UserIdentitySnapshot>, DatabaseError>;

    /// Live profile with owned items and their images.
    async fn find_profile(&self, id: i64) -> Result<Option<UserProfile>, DatabaseError>;
}

/// Queries against `t_user`.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// Insert a user and return the new id. The location is stored both as
    /// raw coordinates and as an SRID 4326 point.
    async fn insert(&self, user: &NewUser) -> Result<i64, DatabaseError> {
        let query = r#"
            INSERT INTO t_user (
                nickname,
                phone_number,
                addr,
                long,
                lat,
                geo_point,
                username,
                password
            ) VALUES (
                $1,
                $2,
                $3,
                $4,
                $5,
                ST_SetSRID(ST_MakePoint($4, $5), 4326),
                $6,
                $7
            )
            RETURNING id::int8
        "#;

        let id = sqlx::query_scalar::<_, i64>(query)
            .bind(&user.nickname)
            .bind(&user.phone_number)
            .bind(&user.addr)
            .bind(user.long)
            .bind(user.lat)
            .bind(&user.username)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    async fn set_profile_img(&self, id: i64, url: &str) -> Result<(), DatabaseError> {
        let query = r#"
            UPDATE t_user SET
                profile_img = $1,
                updated_dt = NOW()
            WHERE id = $2
        "#;

        let result = sqlx::query(query).bind(url).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    async fn find_snapshot(&self, id: i64) -> Result<Option<UserIdentitySnapshot>, DatabaseError> {
        let query = format!("SELECT {} FROM t_user AS u WHERE u.id = $1", SNAPSHOT_COLUMNS);

        let user = sqlx::query_as::<_, UserIdentitySnapshot>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_for_login(&self, username: &str) -> Result<Option<UserIdentitySnapshot>, DatabaseError> {
        let query = format!(
            "SELECT {}, u.password FROM t_user AS u WHERE u.username = $1",
            SNAPSHOT_COLUMNS
        );

        let user = sqlx::query_as::<_, UserIdentitySnapshot>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_profile(&self, id: i64) -> Result<Option<UserProfile>, DatabaseError> {
        let query = format!(
            r#"
            SELECT
                {},
                (
                    SELECT COALESCE(json_agg(
                        json_build_object(
                            'id', i.id,
                            'title', i.title,
                            'price', i.price,
                            'content', i.content,
                            'status', i.status,
                            'created_at', i.created_at,
                            'updated_at', i.updated_at,
                            'item_images', (
                                SELECT COALESCE(json_agg(
                                    json_build_object(
                                        'id', img.id,
                                        'img_url', img.img_url
                                    )
                                ), '[]'::json)
                                FROM t_item_img img
                                WHERE img.item_id = i.id
                            )
                        )
                    ), '[]'::json)
                    FROM t_item i
                    WHERE i.user_id = u.id
                ) AS items
            FROM t_user AS u
            WHERE u.id = $1
            "#,
            SNAPSHOT_COLUMNS
        );

        let profile = sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }
}
