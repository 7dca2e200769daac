pub mod database;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::repository::{
    PgAssignmentRepository, PgContentRepository, PgDeviceRepository, PgPlaylistRepository,
    PgScreenshotRepository,
};
use crate::service::auth::{BearerValidator, JwtCodec};
use crate::service::{AssignmentPropagator, BroadcastCoordinator, SessionRegistry};

/// Everything the server (and, for the in-process parts, the device) needs
/// wired up at startup: config, database pool, repositories, and the
/// in-memory services built on top of them. Assembling this once in one
/// place is the same bootstrap shape the teacher uses for its `AppState`.
pub struct AppContext {
    pub config: AppConfig,
    pub pool: PgPool,
    pub devices: Arc<PgDeviceRepository>,
    pub content: Arc<PgContentRepository>,
    pub playlists: Arc<PgPlaylistRepository>,
    pub assignments: Arc<PgAssignmentRepository>,
    pub screenshots: Arc<PgScreenshotRepository>,
    pub registry: Arc<SessionRegistry>,
    pub propagator: Arc<AssignmentPropagator>,
    pub broadcast: Arc<BroadcastCoordinator>,
    pub jwt: Arc<JwtCodec>,
    pub bearer_validator: Arc<BearerValidator>,
}

impl AppContext {
    pub async fn bootstrap(config: AppConfig) -> anyhow::Result<Self> {
        let pool = database::connect(&config.database).await?;

        let devices = Arc::new(PgDeviceRepository::new(pool.clone()));
        let content = Arc::new(PgContentRepository::new(pool.clone()));
        let playlists = Arc::new(PgPlaylistRepository::new(pool.clone()));
        let assignments = Arc::new(PgAssignmentRepository::new(pool.clone()));
        let screenshots = Arc::new(PgScreenshotRepository::new(pool.clone()));

        let registry = Arc::new(SessionRegistry::new());
        let propagator = Arc::new(AssignmentPropagator::new(
            devices.clone(),
            playlists.clone(),
            assignments.clone(),
            content.clone(),
            registry.clone(),
        ));
        let broadcast = Arc::new(BroadcastCoordinator::new(registry.clone()));

        let jwt = Arc::new(JwtCodec::new(&config.auth.jwt_secret));
        let bearer_validator = Arc::new(BearerValidator::new(jwt.clone()));

        Ok(Self {
            config,
            pool,
            devices,
            content,
            playlists,
            assignments,
            screenshots,
            registry,
            propagator,
            broadcast,
            jwt,
            bearer_validator,
        })
    }
}
