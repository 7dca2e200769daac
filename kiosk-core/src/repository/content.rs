use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{CoreError, CoreResult};
use crate::models::{Content, ContentId, CreateContentRequest, UpdateContentRequest};

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn create(&self, req: CreateContentRequest) -> CoreResult<Content>;
    async fn get(&self, id: i64) -> CoreResult<Option<Content>>;
    async fn list(&self) -> CoreResult<Vec<Content>>;
    async fn update(&self, id: i64, req: UpdateContentRequest) -> CoreResult<Content>;
    async fn delete(&self, id: i64) -> CoreResult<()>;
}

pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ContentRow {
    id: i64,
    name: String,
    url: String,
    description: Option<String>,
    interactive: bool,
    thumbnail_url: Option<String>,
}

impl From<ContentRow> for Content {
    fn from(row: ContentRow) -> Self {
        Self {
            id: ContentId(row.id),
            name: row.name,
            url: row.url,
            description: row.description,
            interactive: row.interactive,
            thumbnail_url: row.thumbnail_url,
        }
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn create(&self, req: CreateContentRequest) -> CoreResult<Content> {
        let row = sqlx::query_as::<_, ContentRow>(
            r#"
            INSERT INTO content (name, url, description, interactive, thumbnail_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, url, description, interactive, thumbnail_url
            "#,
        )
        .bind(&req.name)
        .bind(&req.url)
        .bind(&req.description)
        .bind(req.interactive)
        .bind(&req.thumbnail_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> CoreResult<Option<Content>> {
        let row = sqlx::query_as::<_, ContentRow>(
            "SELECT id, name, url, description, interactive, thumbnail_url FROM content WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list(&self) -> CoreResult<Vec<Content>> {
        let rows = sqlx::query_as::<_, ContentRow>(
            "SELECT id, name, url, description, interactive, thumbnail_url FROM content ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, req: UpdateContentRequest) -> CoreResult<Content> {
        let row = sqlx::query_as::<_, ContentRow>(
            r#"
            UPDATE content SET
                name = COALESCE($2, name),
                url = COALESCE($3, url),
                description = COALESCE($4, description),
                interactive = COALESCE($5, interactive),
                thumbnail_url = COALESCE($6, thumbnail_url)
            WHERE id = $1
            RETURNING id, name, url, description, interactive, thumbnail_url
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.url)
        .bind(&req.description)
        .bind(req.interactive)
        .bind(&req.thumbnail_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CoreError::ContentNotFound(id))?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
