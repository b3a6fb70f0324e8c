//! Configuration for the Shanny Tech site engine.
//!
//! Values come from the environment (after `.env` is loaded), then an
//! optional `shanny.toml`, then built-in defaults. The composed [`Config`]
//! passes through guard rails that reject invalid values and collect
//! [`ConfigWarnings`] for setups that run in a degraded mode.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    AdminConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    HstsSettings, MailConfig, RateLimitConfig, SecurityConfig, ServerConfig,
    SiteConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
