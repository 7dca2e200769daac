pub mod auth;
pub mod broadcast;
pub mod content;
pub mod devices;
pub mod error;
pub mod middleware;
pub mod playlists;
pub mod screenshots;
pub mod websocket;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/device/token", post(auth::issue_device_token))
        .route("/auth/admin/token", post(auth::issue_admin_token))
        .route("/devices", post(devices::create_device).get(devices::list_devices))
        .route(
            "/devices/{id}",
            get(devices::get_device).put(devices::update_device).delete(devices::delete_device),
        )
        .route("/devices/{device_id}/navigate", post(devices::navigate))
        .route("/devices/{device_id}/refresh", post(devices::refresh))
        .route("/devices/{device_id}/screenshot", post(devices::request_screenshot))
        .route("/devices/{device_id}/config", put(devices::update_config))
        .route("/devices/{device_id}/restart", post(devices::restart))
        .route("/devices/{device_id}/screencast/start", post(devices::screencast_start))
        .route("/devices/{device_id}/screencast/stop", post(devices::screencast_stop))
        .route("/devices/{device_id}/remote/click", post(devices::remote_click))
        .route("/devices/{device_id}/remote/type", post(devices::remote_type))
        .route("/devices/{device_id}/remote/key", post(devices::remote_key))
        .route("/devices/{device_id}/remote/scroll", post(devices::remote_scroll))
        .route("/devices/{device_id}/playlist/pause", post(devices::playlist_pause))
        .route("/devices/{device_id}/playlist/resume", post(devices::playlist_resume))
        .route("/devices/{device_id}/playlist/next", post(devices::playlist_next))
        .route("/devices/{device_id}/playlist/previous", post(devices::playlist_previous))
        .route(
            "/devices/{id}/screenshots/latest",
            get(screenshots::latest_screenshot),
        )
        .route("/content", post(content::create_content).get(content::list_content))
        .route(
            "/content/{id}",
            get(content::get_content).put(content::update_content).delete(content::delete_content),
        )
        .route(
            "/playlists",
            post(playlists::create_playlist).get(playlists::list_playlists),
        )
        .route(
            "/playlists/{id}",
            get(playlists::get_playlist).put(playlists::update_playlist).delete(playlists::delete_playlist),
        )
        .route(
            "/playlists/{id}/items",
            get(playlists::list_items).post(playlists::add_item),
        )
        .route(
            "/playlists/{id}/items/{item_id}",
            put(playlists::update_item).delete(playlists::remove_item),
        )
        .route("/assignments", post(playlists::create_assignment))
        .route(
            "/playlists/{id}/assignments/{assignment_id}",
            delete(playlists::delete_assignment),
        )
        .route("/broadcast/start", post(broadcast::start_broadcast))
        .route("/broadcast/end", post(broadcast::end_broadcast))
        .route("/broadcast", get(broadcast::broadcast_status))
        .route("/ws/device", get(websocket::device_ws))
        .route("/ws/admin", get(websocket::admin_ws))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
