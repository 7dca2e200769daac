use async_trait::async_trait;

/// Local content caching (spec §9): before navigating to a URL, the
/// executor may check whether it's cacheable, wait for a background
/// download, and resolve to a local path instead of fetching over the
/// network on every rotation.
#[async_trait]
pub trait ContentCache: Send + Sync {
    fn is_cacheable(&self, url: &str) -> bool;
    async fn wait_for_cache(&self, url: &str);
    fn local_path(&self, url: &str) -> Option<String>;
}

/// Treats nothing as cacheable — every navigation goes straight to the
/// network URL. Default until a real on-disk cache is wired in.
#[derive(Default)]
pub struct NoopContentCache;

#[async_trait]
impl ContentCache for NoopContentCache {
    fn is_cacheable(&self, _url: &str) -> bool {
        false
    }

    async fn wait_for_cache(&self, _url: &str) {}

    fn local_path(&self, _url: &str) -> Option<String> {
        None
    }
}
