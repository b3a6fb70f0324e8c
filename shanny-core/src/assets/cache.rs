use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::loader::ImageLoader;
use crate::carousel::SlideDeck;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Loaded,
    Failed,
}

/// Load outcomes per image locator.
///
/// Created once at startup and shared by reference; there is no global
/// instance.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    entries: Arc<DashMap<String, ImageStatus>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, src: &str) -> Option<ImageStatus> {
        self.entries.get(src).map(|entry| *entry)
    }

    pub fn is_loaded(&self, src: &str) -> bool {
        self.status(src) == Some(ImageStatus::Loaded)
    }

    pub fn record(&self, src: impl Into<String>, status: ImageStatus) {
        self.entries.insert(src.into(), status);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Loads `src` unless it is empty or already loaded. Failed images are
    /// retried on the next call.
    pub async fn preload(
        &self,
        loader: &dyn ImageLoader,
        src: &str,
    ) -> Option<ImageStatus> {
        if src.is_empty() {
            return None;
        }
        if self.is_loaded(src) {
            return Some(ImageStatus::Loaded);
        }

        let status = match loader.load(src).await {
            Ok(()) => {
                debug!(src, "image preloaded");
                ImageStatus::Loaded
            }
            Err(err) => {
                warn!(src, error = %err, "image preload failed");
                ImageStatus::Failed
            }
        };
        self.record(src, status);
        Some(status)
    }

    /// Preloads the first two slides so the first transition has its image.
    pub async fn preload_leading(
        &self,
        loader: &dyn ImageLoader,
        deck: &SlideDeck,
    ) -> Vec<(String, ImageStatus)> {
        let mut outcomes = Vec::new();
        for slide in deck.iter().take(2) {
            if let Some(status) = self.preload(loader, &slide.image).await {
                outcomes.push((slide.image.clone(), status));
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::assets::ImageLoadError;

    #[derive(Default)]
    struct CountingLoader {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ImageLoader for CountingLoader {
        async fn load(&self, _src: &str) -> Result<(), ImageLoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ImageLoadError::Status(404))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn loaded_images_are_not_fetched_twice() {
        let cache = ImageCache::new();
        let loader = CountingLoader::default();

        assert_eq!(
            cache.preload(&loader, "/hero/1.jpg").await,
            Some(ImageStatus::Loaded)
        );
        assert_eq!(
            cache.preload(&loader, "/hero/1.jpg").await,
            Some(ImageStatus::Loaded)
        );
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_sources_are_skipped() {
        let cache = ImageCache::new();
        let loader = CountingLoader::default();
        assert_eq!(cache.preload(&loader, "").await, None);
        assert!(cache.is_empty());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failures_are_recorded_and_retried() {
        let cache = ImageCache::new();
        let loader = CountingLoader {
            fail: true,
            ..Default::default()
        };
        assert_eq!(
            cache.preload(&loader, "/missing.png").await,
            Some(ImageStatus::Failed)
        );
        assert_eq!(cache.status("/missing.png"), Some(ImageStatus::Failed));

        cache.preload(&loader, "/missing.png").await;
        assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn leading_preload_covers_first_two_slides() {
        let cache = ImageCache::new();
        let loader = CountingLoader::default();
        let deck = SlideDeck::hero(["/a.jpg", "/b.jpg", "/c.jpg"]).unwrap();

        let outcomes = cache.preload_leading(&loader, &deck).await;
        assert_eq!(outcomes.len(), 2);
        assert!(cache.is_loaded("/a.jpg"));
        assert!(cache.is_loaded("/b.jpg"));
        assert!(!cache.is_loaded("/c.jpg"));
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = ImageCache::new();
        let shared = cache.clone();
        cache.record("/x.webp", ImageStatus::Loaded);
        assert!(shared.is_loaded("/x.webp"));
    }
}
