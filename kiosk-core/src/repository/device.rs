use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::{CoreError, CoreResult};
use crate::models::{CreateDeviceRequest, Device, DeviceMetadata, DeviceStatus, UpdateDeviceRequest};

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn create(&self, req: CreateDeviceRequest) -> CoreResult<Device>;
    async fn get_by_device_id(&self, device_id: &str) -> CoreResult<Option<Device>>;
    async fn get_by_surrogate_id(&self, id: i64) -> CoreResult<Option<Device>>;
    async fn list(&self) -> CoreResult<Vec<Device>>;
    async fn update(&self, id: i64, req: UpdateDeviceRequest) -> CoreResult<Device>;
    async fn delete(&self, id: i64) -> CoreResult<()>;
    async fn set_status(&self, device_id: &str, status: DeviceStatus) -> CoreResult<()>;
}

pub struct PgDeviceRepository {
    pool: PgPool,
}

impl PgDeviceRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DeviceRow {
    id: i64,
    device_id: String,
    name: String,
    description: Option<String>,
    location: Option<String>,
    status: String,
    last_seen: chrono::DateTime<Utc>,
    screen_resolution: Option<String>,
    os_version: Option<String>,
    client_version: Option<String>,
    ip_address: Option<String>,
    created_at: chrono::DateTime<Utc>,
}

impl From<DeviceRow> for Device {
    fn from(row: DeviceRow) -> Self {
        let status = match row.status.as_str() {
            "online" => DeviceStatus::Online,
            "error" => DeviceStatus::Error,
            _ => DeviceStatus::Offline,
        };
        Self {
            id: row.id.into(),
            device_id: row.device_id.into(),
            name: row.name,
            description: row.description,
            location: row.location,
            status,
            last_seen: row.last_seen,
            metadata: DeviceMetadata {
                screen_resolution: row.screen_resolution,
                os_version: row.os_version,
                client_version: row.client_version,
                ip_address: row.ip_address,
            },
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl DeviceRepository for PgDeviceRepository {
    async fn create(&self, req: CreateDeviceRequest) -> CoreResult<Device> {
        let row = sqlx::query_as::<_, DeviceRow>(
            r#"
            INSERT INTO devices (device_id, name, description, location, status, last_seen, created_at)
            VALUES ($1, $2, $3, $4, 'offline', now(), now())
            RETURNING id, device_id, name, description, location, status, last_seen,
                      screen_resolution, os_version, client_version, ip_address, created_at
            "#,
        )
        .bind(&req.device_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.location)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get_by_device_id(&self, device_id: &str) -> CoreResult<Option<Device>> {
        let row = sqlx::query_as::<_, DeviceRow>(
            r#"
            SELECT id, device_id, name, description, location, status, last_seen,
                   screen_resolution, os_version, client_version, ip_address, created_at
            FROM devices WHERE device_id = $1
            "#,
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn get_by_surrogate_id(&self, id: i64) -> CoreResult<Option<Device>> {
        let row = sqlx::query_as::<_, DeviceRow>(
            r#"
            SELECT id, device_id, name, description, location, status, last_seen,
                   screen_resolution, os_version, client_version, ip_address, created_at
            FROM devices WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list(&self) -> CoreResult<Vec<Device>> {
        let rows = sqlx::query_as::<_, DeviceRow>(
            r#"
            SELECT id, device_id, name, description, location, status, last_seen,
                   screen_resolution, os_version, client_version, ip_address, created_at
            FROM devices ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, req: UpdateDeviceRequest) -> CoreResult<Device> {
        let row = sqlx::query_as::<_, DeviceRow>(
            r#"
            UPDATE devices SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                location = COALESCE($4, location)
            WHERE id = $1
            RETURNING id, device_id, name, description, location, status, last_seen,
                      screen_resolution, os_version, client_version, ip_address, created_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.location)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CoreError::DeviceNotFound(id.to_string()))?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_status(&self, device_id: &str, status: DeviceStatus) -> CoreResult<()> {
        sqlx::query("UPDATE devices SET status = $2, last_seen = now() WHERE device_id = $1")
            .bind(device_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
