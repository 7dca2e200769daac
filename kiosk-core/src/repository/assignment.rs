use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::CoreResult;
use crate::models::{AssignmentId, CreateAssignmentRequest, DevicePlaylistAssignment, DeviceSurrogateId, PlaylistId};

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create(&self, req: CreateAssignmentRequest) -> CoreResult<DevicePlaylistAssignment>;
    async fn delete(&self, id: i64) -> CoreResult<()>;
    /// All playlist ids assigned to a device, in no particular order — the
    /// resolver picks which one is active.
    async fn playlist_ids_for_device(&self, device_surrogate_id: i64) -> CoreResult<Vec<i64>>;
    /// All devices (surrogate ids) assigned a given playlist, used by the
    /// Assignment Propagator (spec §4.5) to compute the affected set.
    async fn device_ids_for_playlist(&self, playlist_id: i64) -> CoreResult<Vec<i64>>;
}

pub struct PgAssignmentRepository {
    pool: PgPool,
}

impl PgAssignmentRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AssignmentRow {
    id: i64,
    device_id: i64,
    playlist_id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AssignmentRow> for DevicePlaylistAssignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            id: AssignmentId(row.id),
            device_id: DeviceSurrogateId(row.device_id),
            playlist_id: PlaylistId(row.playlist_id),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AssignmentRepository for PgAssignmentRepository {
    async fn create(&self, req: CreateAssignmentRequest) -> CoreResult<DevicePlaylistAssignment> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            INSERT INTO device_playlists (device_id, playlist_id, created_at)
            VALUES ($1, $2, now())
            RETURNING id, device_id, playlist_id, created_at
            "#,
        )
        .bind(req.device_id)
        .bind(req.playlist_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        sqlx::query("DELETE FROM device_playlists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn playlist_ids_for_device(&self, device_surrogate_id: i64) -> CoreResult<Vec<i64>> {
        let ids: Vec<(i64,)> = sqlx::query_as(
            "SELECT playlist_id FROM device_playlists WHERE device_id = $1",
        )
        .bind(device_surrogate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    async fn device_ids_for_playlist(&self, playlist_id: i64) -> CoreResult<Vec<i64>> {
        let ids: Vec<(i64,)> = sqlx::query_as(
            "SELECT device_id FROM device_playlists WHERE playlist_id = $1",
        )
        .bind(playlist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }
}
