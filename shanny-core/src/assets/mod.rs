//! Hero image discovery and preloading

pub mod cache;
pub mod discovery;
pub mod loader;

pub use cache::{ImageCache, ImageStatus};
pub use discovery::{HERO_IMAGE_EXTENSIONS, discover_hero_images};
pub use loader::{HttpImageLoader, ImageLoadError, ImageLoader};
