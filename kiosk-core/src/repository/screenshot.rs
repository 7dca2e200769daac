use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::CoreResult;
use crate::models::{DeviceSurrogateId, ScreenshotId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: ScreenshotId,
    pub device_id: DeviceSurrogateId,
    pub url: Option<String>,
    pub image_data: Option<String>,
    pub captured_at: DateTime<Utc>,
}

#[async_trait]
pub trait ScreenshotRepository: Send + Sync {
    async fn record(
        &self,
        device_surrogate_id: i64,
        image_data: Option<String>,
        url: Option<String>,
        captured_at: DateTime<Utc>,
    ) -> CoreResult<Screenshot>;
    async fn latest_for_device(&self, device_surrogate_id: i64) -> CoreResult<Option<Screenshot>>;
}

pub struct PgScreenshotRepository {
    pool: PgPool,
}

impl PgScreenshotRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ScreenshotRow {
    id: i64,
    device_id: i64,
    url: Option<String>,
    image_data: Option<String>,
    captured_at: DateTime<Utc>,
}

impl From<ScreenshotRow> for Screenshot {
    fn from(row: ScreenshotRow) -> Self {
        Self {
            id: ScreenshotId(row.id),
            device_id: DeviceSurrogateId(row.device_id),
            url: row.url,
            image_data: row.image_data,
            captured_at: row.captured_at,
        }
    }
}

#[async_trait]
impl ScreenshotRepository for PgScreenshotRepository {
    async fn record(
        &self,
        device_surrogate_id: i64,
        image_data: Option<String>,
        url: Option<String>,
        captured_at: DateTime<Utc>,
    ) -> CoreResult<Screenshot> {
        let row = sqlx::query_as::<_, ScreenshotRow>(
            r#"
            INSERT INTO screenshots (device_id, image_data, url, captured_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, device_id, url, image_data, captured_at
            "#,
        )
        .bind(device_surrogate_id)
        .bind(&image_data)
        .bind(&url)
        .bind(captured_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn latest_for_device(&self, device_surrogate_id: i64) -> CoreResult<Option<Screenshot>> {
        let row = sqlx::query_as::<_, ScreenshotRow>(
            r#"
            SELECT id, device_id, url, image_data, captured_at FROM screenshots
            WHERE device_id = $1 ORDER BY captured_at DESC LIMIT 1
            "#,
        )
        .bind(device_surrogate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }
}
