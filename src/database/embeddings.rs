use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::NewImageEmbedding;

/// Writes to `t_imgembed_test` (pgvector column `embedding`).
#[derive(Clone)]
pub struct EmbeddingRepository {
    pool: PgPool,
}

impl EmbeddingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &NewImageEmbedding) -> Result<(), DatabaseError> {
        let query = r#"
            INSERT INTO t_imgembed_test
                (encname, originalname, embedding, imgurl, created_at)
            VALUES ($1, $2, $3::vector, $4, NOW())
        "#;

        sqlx::query(query)
            .bind(&row.encname)
            .bind(&row.originalname)
            .bind(&row.embedding)
            .bind(&row.imgurl)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
