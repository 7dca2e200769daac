use async_trait::async_trait;

/// Abstraction over whatever actually puts pixels on the screen (browser
/// shell, native compositor, etc). Kept opaque and swappable the way the
/// spec frames it (§9): the executor only ever calls through this trait.
#[async_trait]
pub trait DisplayDriver: Send + Sync {
    async fn navigate(&self, url: &str);
    async fn show_message(&self, message: &str);
    async fn click(&self, x: f64, y: f64);
    async fn type_text(&self, text: &str);
    async fn press_key(&self, key: &str);
    async fn scroll(&self, delta_x: f64, delta_y: f64);
    async fn capture_screenshot(&self) -> Option<String>;
}

/// Logs every call instead of driving real hardware. Useful standalone and
/// as the default until a platform-specific driver is wired in.
#[derive(Default)]
pub struct LoggingDisplayDriver;

#[async_trait]
impl DisplayDriver for LoggingDisplayDriver {
    async fn navigate(&self, url: &str) {
        tracing::info!(url, "display: navigate");
    }

    async fn show_message(&self, message: &str) {
        tracing::info!(message, "display: show_message");
    }

    async fn click(&self, x: f64, y: f64) {
        tracing::debug!(x, y, "display: click");
    }

    async fn type_text(&self, text: &str) {
        tracing::debug!(text, "display: type_text");
    }

    async fn press_key(&self, key: &str) {
        tracing::debug!(key, "display: press_key");
    }

    async fn scroll(&self, delta_x: f64, delta_y: f64) {
        tracing::debug!(delta_x, delta_y, "display: scroll");
    }

    async fn capture_screenshot(&self) -> Option<String> {
        None
    }
}
