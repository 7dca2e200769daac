use std::sync::Arc;

use kiosk_core::AppContext;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

/// Shared application state handed to every axum handler. A thin `Arc`
/// wrapper around `AppContext` so `Clone` stays cheap per the teacher's
/// `AppState` convention.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
}

impl axum::extract::FromRef<AppState> for AppState {
    fn from_ref(state: &AppState) -> Self {
        state.clone()
    }
}

pub async fn serve(ctx: AppContext, bind_addr: &str) -> anyhow::Result<()> {
    let state = AppState { ctx: Arc::new(ctx) };
    let app = crate::http::router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    info!(addr = bind_addr, "listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
