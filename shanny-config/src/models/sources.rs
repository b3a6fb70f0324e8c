use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    #[serde(default)]
    pub security: FileSecurityConfig,
    #[serde(default)]
    pub mail: FileMailConfig,
    #[serde(default)]
    pub admin: FileAdminConfig,
    #[serde(default)]
    pub rate_limit: FileRateLimitConfig,
    #[serde(default)]
    pub site: FileSiteConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSecurityConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_proxy_headers: Option<bool>,
    #[serde(default)]
    pub hsts: FileHstsConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileHstsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_subdomains: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preload: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileMailConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_pass: Option<String>,
    /// Human readable duration, e.g. `"10s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAdminConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileRateLimitConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_requests: Option<u32>,
    /// Human readable duration, e.g. `"5m"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSiteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_top_offset_px: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_footer_height_px: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_base: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub database_max_connections: Option<u32>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub trust_proxy_headers: Option<bool>,
    pub hsts_max_age: Option<u64>,
    pub hsts_include_subdomains: Option<bool>,
    pub hsts_preload: Option<bool>,
    pub mail_from: Option<String>,
    pub mail_to: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub mail_timeout: Option<String>,
    pub admin_api_key: Option<String>,
    pub rate_limit_max: Option<u32>,
    pub rate_limit_window: Option<String>,
    pub carousel_interval: Option<String>,
    pub default_top_offset_px: Option<u32>,
    pub default_footer_height_px: Option<u32>,
    pub frame_interval: Option<String>,
    pub hero_image_dir: Option<PathBuf>,
    pub hero_image_base: Option<String>,
}

impl EnvConfig {
    /// Reads the process environment.
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the environment view from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name).filter(|value| !value.trim().is_empty())
        };

        Self {
            config_path: var("SHANNY_CONFIG").map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: var("SERVER_PORT")
                .or_else(|| var("PORT"))
                .and_then(|raw| raw.trim().parse().ok()),
            database_url: var("DATABASE_URL"),
            database_max_connections: parse_value(var("DATABASE_MAX_CONNECTIONS")),
            cors_allowed_origins: var("CORS_ORIGINS").map(|raw| parse_csv(&raw)),
            trust_proxy_headers: var("TRUST_PROXY_HEADERS")
                .and_then(|raw| parse_bool(&raw)),
            hsts_max_age: parse_value(var("HSTS_MAX_AGE")),
            hsts_include_subdomains: var("HSTS_INCLUDE_SUBDOMAINS")
                .and_then(|raw| parse_bool(&raw)),
            hsts_preload: var("HSTS_PRELOAD").and_then(|raw| parse_bool(&raw)),
            mail_from: var("EMAIL_FROM"),
            mail_to: var("EMAIL_TO"),
            smtp_host: var("SMTP_HOST"),
            smtp_port: parse_value(var("SMTP_PORT")),
            smtp_user: var("SMTP_USER"),
            smtp_pass: var("SMTP_PASS"),
            mail_timeout: var("MAIL_TIMEOUT"),
            admin_api_key: var("ADMIN_API_KEY"),
            rate_limit_max: parse_value(var("RATE_LIMIT_MAX")),
            rate_limit_window: var("RATE_LIMIT_WINDOW"),
            carousel_interval: var("CAROUSEL_INTERVAL"),
            default_top_offset_px: parse_value(var("LAYOUT_TOP_OFFSET_PX")),
            default_footer_height_px: parse_value(var("LAYOUT_FOOTER_HEIGHT_PX")),
            frame_interval: var("LAYOUT_FRAME_INTERVAL"),
            hero_image_dir: var("HERO_IMAGE_DIR").map(PathBuf::from),
            hero_image_base: var("HERO_IMAGE_BASE"),
        }
    }
}

fn parse_value<T: FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|raw| raw.trim().parse().ok())
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
