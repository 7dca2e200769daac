//! Domain layer for the kiosk fleet coordination server: models, the
//! Persistence Adapter, and the in-memory services (Session Registry,
//! Bearer Validator, Assignment Propagator, Playlist Resolver, Broadcast
//! Coordinator) that `kiosk-server` wires into its HTTP/websocket surface.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod service;

pub use bootstrap::AppContext;
pub use config::AppConfig;
pub use error::{CoreError, CoreResult};
