mod http;
mod server;

use kiosk_core::{AppConfig, AppContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    kiosk_core::logging::init(&config.log);

    let bind_addr = std::env::var("KIOSK_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let ctx = AppContext::bootstrap(config).await?;

    server::serve(ctx, &bind_addr).await
}
