use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{CoreError, CoreResult};
use crate::models::{
    CreatePlaylistItemRequest, CreatePlaylistRequest, Playlist, PlaylistId, PlaylistItem,
    PlaylistItemId, UpdatePlaylistItemRequest, UpdatePlaylistRequest,
};

#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn create(&self, req: CreatePlaylistRequest) -> CoreResult<Playlist>;
    async fn get(&self, id: i64) -> CoreResult<Option<Playlist>>;
    async fn list(&self) -> CoreResult<Vec<Playlist>>;
    async fn update(&self, id: i64, req: UpdatePlaylistRequest) -> CoreResult<Playlist>;
    async fn delete(&self, id: i64) -> CoreResult<()>;

    async fn items_for_playlist(&self, playlist_id: i64) -> CoreResult<Vec<PlaylistItem>>;
    async fn add_item(&self, req: CreatePlaylistItemRequest) -> CoreResult<PlaylistItem>;
    async fn update_item(&self, id: i64, req: UpdatePlaylistItemRequest) -> CoreResult<PlaylistItem>;
    async fn remove_item(&self, id: i64) -> CoreResult<()>;
}

pub struct PgPlaylistRepository {
    pool: PgPool,
}

impl PgPlaylistRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PlaylistRow {
    id: i64,
    name: String,
    is_active: bool,
}

impl From<PlaylistRow> for Playlist {
    fn from(row: PlaylistRow) -> Self {
        Self {
            id: PlaylistId(row.id),
            name: row.name,
            is_active: row.is_active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PlaylistItemRow {
    id: i64,
    playlist_id: i64,
    content_id: i64,
    display_duration_ms: i64,
    order_index: i32,
    time_window_start: Option<String>,
    time_window_end: Option<String>,
    days_of_week: Vec<i16>,
}

impl From<PlaylistItemRow> for PlaylistItem {
    fn from(row: PlaylistItemRow) -> Self {
        Self {
            id: PlaylistItemId(row.id),
            playlist_id: PlaylistId(row.playlist_id),
            content_id: row.content_id.into(),
            display_duration_ms: row.display_duration_ms.max(0) as u64,
            order_index: row.order_index,
            time_window_start: row.time_window_start,
            time_window_end: row.time_window_end,
            days_of_week: row.days_of_week.into_iter().map(|d| d.max(0) as u8).collect(),
        }
    }
}

#[async_trait]
impl PlaylistRepository for PgPlaylistRepository {
    async fn create(&self, req: CreatePlaylistRequest) -> CoreResult<Playlist> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            "INSERT INTO playlists (name, is_active) VALUES ($1, $2) RETURNING id, name, is_active",
        )
        .bind(&req.name)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> CoreResult<Option<Playlist>> {
        let row = sqlx::query_as::<_, PlaylistRow>("SELECT id, name, is_active FROM playlists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list(&self) -> CoreResult<Vec<Playlist>> {
        let rows = sqlx::query_as::<_, PlaylistRow>("SELECT id, name, is_active FROM playlists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, req: UpdatePlaylistRequest) -> CoreResult<Playlist> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            r#"
            UPDATE playlists SET
                name = COALESCE($2, name),
                is_active = COALESCE($3, is_active)
            WHERE id = $1
            RETURNING id, name, is_active
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CoreError::PlaylistNotFound(id))?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn items_for_playlist(&self, playlist_id: i64) -> CoreResult<Vec<PlaylistItem>> {
        let rows = sqlx::query_as::<_, PlaylistItemRow>(
            r#"
            SELECT id, playlist_id, content_id, display_duration_ms, order_index,
                   time_window_start, time_window_end, days_of_week
            FROM playlist_items WHERE playlist_id = $1 ORDER BY order_index
            "#,
        )
        .bind(playlist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn add_item(&self, req: CreatePlaylistItemRequest) -> CoreResult<PlaylistItem> {
        let days: Vec<i16> = req.days_of_week.iter().map(|d| i16::from(*d)).collect();
        let row = sqlx::query_as::<_, PlaylistItemRow>(
            r#"
            INSERT INTO playlist_items
                (playlist_id, content_id, display_duration_ms, order_index,
                 time_window_start, time_window_end, days_of_week)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, playlist_id, content_id, display_duration_ms, order_index,
                      time_window_start, time_window_end, days_of_week
            "#,
        )
        .bind(req.playlist_id)
        .bind(req.content_id)
        .bind(req.display_duration_ms as i64)
        .bind(req.order_index)
        .bind(&req.time_window_start)
        .bind(&req.time_window_end)
        .bind(days)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_item(&self, id: i64, req: UpdatePlaylistItemRequest) -> CoreResult<PlaylistItem> {
        let days: Option<Vec<i16>> = req
            .days_of_week
            .map(|ds| ds.iter().map(|d| i16::from(*d)).collect());
        let row = sqlx::query_as::<_, PlaylistItemRow>(
            r#"
            UPDATE playlist_items SET
                display_duration_ms = COALESCE($2, display_duration_ms),
                order_index = COALESCE($3, order_index),
                time_window_start = COALESCE($4, time_window_start),
                time_window_end = COALESCE($5, time_window_end),
                days_of_week = COALESCE($6, days_of_week)
            WHERE id = $1
            RETURNING id, playlist_id, content_id, display_duration_ms, order_index,
                      time_window_start, time_window_end, days_of_week
            "#,
        )
        .bind(id)
        .bind(req.display_duration_ms.map(|v| v as i64))
        .bind(req.order_index)
        .bind(req.time_window_start.flatten())
        .bind(req.time_window_end.flatten())
        .bind(days)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CoreError::PlaylistItemNotFound(id))?;
        Ok(row.into())
    }

    async fn remove_item(&self, id: i64) -> CoreResult<()> {
        sqlx::query("DELETE FROM playlist_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
