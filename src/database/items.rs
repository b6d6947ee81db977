use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::{ItemDetail, ItemDraft};

/// Listing persistence used by the handlers.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_detail(&self, item_id: i64) -> Result<Option<ItemDetail>, DatabaseError>;

    /// True when `item_id` exists and belongs to `user_id`.
    async fn is_owned_by(&self, item_id: i64, user_id: i64) -> Result<bool, DatabaseError>;

    async fn insert(&self, user_id: i64, draft: &ItemDraft) -> Result<i64, DatabaseError>;

    async fn update(&self, item_id: i64, draft: &ItemDraft) -> Result<(), DatabaseError>;

    async fn add_image(&self, item_id: i64, img_url: &str) -> Result<i64, DatabaseError>;
}

/// Queries against `t_item` and `t_item_img`.
#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn find_detail(&self, item_id: i64) -> Result<Option<ItemDetail>, DatabaseError> {
        let query = r#"
            SELECT
                i.id::int8 AS item_id,
                i.user_id::int8 AS user_id,
                i.category_id::int8 AS category_id,
                c.name::text AS category_name,
                i.title,
                i.content,
                i.price::int8 AS price,
                i.status::text AS status,
                i.addr,
                i.created_at::timestamptz AS created_at,
                i.updated_at::timestamptz AS updated_at,
                ST_AsGeoJSON(i.geo_point)::json AS geo_point,
                (i.embedding::text)::json AS embedding,
                COALESCE(
                    json_agg(
                        json_build_object(
                            'img_id', img.id,
                            'url', img.img_url,
                            'created_dt', img.created_dt
                        )
                    ) FILTER (WHERE img.id IS NOT NULL),
                    '[]'::json
                ) AS images
            FROM t_item AS i
            LEFT JOIN t_category AS c ON c.id = i.category_id
            LEFT JOIN t_item_img AS img ON img.item_id = i.id
            WHERE i.id = $1
            GROUP BY i.id, c.name
        "#;

        let item = sqlx::query_as::<_, ItemDetail>(query)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn is_owned_by(&self, item_id: i64, user_id: i64) -> Result<bool, DatabaseError> {
        let query = "SELECT EXISTS (SELECT 1 FROM t_item WHERE id = $1 AND user_id = $2)";

        let exists = sqlx::query_scalar::<_, bool>(query)
            .bind(item_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert(&self, user_id: i64, draft: &ItemDraft) -> Result<i64, DatabaseError> {
        let query = r#"
            INSERT INTO t_item (category_id, user_id, title, content, price, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id::int8
        "#;

        let id = sqlx::query_scalar::<_, i64>(query)
            .bind(draft.category_id)
            .bind(user_id)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(draft.price)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, item_id: i64, draft: &ItemDraft) -> Result<(), DatabaseError> {
        let query = r#"
            UPDATE t_item
            SET category_id = $1, title = $2, content = $3, price = $4, updated_at = NOW()
            WHERE id = $5
        "#;

        sqlx::query(query)
            .bind(draft.category_id)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(draft.price)
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_image(&self, item_id: i64, img_url: &str) -> Result<i64, DatabaseError> {
        let query = r#"
            INSERT INTO t_item_img (item_id, img_url)
            VALUES ($1, $2)
            RETURNING id::int8
        "#;

        let id = sqlx::query_scalar::<_, i64>(query)
            .bind(item_id)
            .bind(img_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }
}
