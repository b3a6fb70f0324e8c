pub mod error;

use once_cell::sync::Lazy;
use std::{fs, path::PathBuf, time::Duration};

use shanny_model::LayoutDefaults;
use tracing::debug;

use crate::models::{
    AdminConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    HstsSettings, MailConfig, RateLimitConfig, SecurityConfig, ServerConfig,
    SiteConfig,
    sources::{EnvConfig, FileConfig},
};
use crate::validation::{self, ConfigWarnings};
use error::ConfigLoadError;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("shanny.toml"),
        PathBuf::from("config/shanny.toml"),
    ]
});

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_HSTS_MAX_AGE: u64 = 31_536_000;
pub const DEFAULT_MAIL_TIMEOUT: &str = "10s";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_RATE_LIMIT_MAX: u32 = 6;
pub const DEFAULT_RATE_LIMIT_WINDOW: &str = "5m";
pub const DEFAULT_CAROUSEL_INTERVAL: &str = "4200ms";
pub const DEFAULT_FRAME_INTERVAL: &str = "16ms";
pub const DEFAULT_HERO_IMAGE_DIR: &str = "public/hero";
pub const DEFAULT_HERO_IMAGE_BASE: &str = "/hero";

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Loads `.env`, then composes environment, file and defaults.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Composes configuration from an already gathered environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) =
            compose_config(file_config, env, config_path, env_file_loaded)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = if let Some(explicit) = &self.options.config_path
        {
            (explicit.clone(), true)
        } else if let Some(from_env) = &env_config.config_path {
            (from_env.clone(), true)
        } else if let Some(found) = DEFAULT_CONFIG_LOCATIONS
            .iter()
            .find(|candidate| candidate.exists())
        {
            (found.clone(), false)
        } else {
            return Ok((None, None));
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        debug!(path = %path.display(), "loaded configuration file");
        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
    env_file_loaded: bool,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if config_path.is_none() {
        warnings.push_with_hint(
            "No shanny.toml detected; using environment variables and defaults",
            "Create shanny.toml or point SHANNY_CONFIG at a configuration file",
        );
    }

    let FileConfig {
        server: file_server,
        database: file_database,
        cors: file_cors,
        security: file_security,
        mail: file_mail,
        admin: file_admin,
        rate_limit: file_rate_limit,
        site: file_site,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
    };

    let database = DatabaseConfig {
        url: env
            .database_url
            .or(file_database.url)
            .filter(|url| !url.trim().is_empty()),
        max_connections: env
            .database_max_connections
            .or(file_database.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]),
    };

    let security = SecurityConfig {
        trust_proxy_headers: env
            .trust_proxy_headers
            .or(file_security.trust_proxy_headers)
            .unwrap_or(false),
        hsts: HstsSettings {
            max_age: env
                .hsts_max_age
                .or(file_security.hsts.max_age)
                .unwrap_or(DEFAULT_HSTS_MAX_AGE),
            include_subdomains: env
                .hsts_include_subdomains
                .or(file_security.hsts.include_subdomains)
                .unwrap_or(false),
            preload: env
                .hsts_preload
                .or(file_security.hsts.preload)
                .unwrap_or(false),
        },
    };

    let mail = MailConfig {
        from: env.mail_from.or(file_mail.from),
        to: env.mail_to.or(file_mail.to),
        smtp_host: env.smtp_host.or(file_mail.smtp_host),
        smtp_port: env
            .smtp_port
            .or(file_mail.smtp_port)
            .unwrap_or(DEFAULT_SMTP_PORT),
        smtp_user: env.smtp_user.or(file_mail.smtp_user),
        smtp_pass: env.smtp_pass.or(file_mail.smtp_pass),
        timeout: parse_duration(
            "mail.timeout",
            env.mail_timeout.or(file_mail.timeout),
            DEFAULT_MAIL_TIMEOUT,
        )?,
    };

    let admin = AdminConfig {
        api_key: env
            .admin_api_key
            .or(file_admin.api_key)
            .filter(|key| !key.trim().is_empty()),
    };

    let rate_limit = RateLimitConfig {
        max_requests: env
            .rate_limit_max
            .or(file_rate_limit.max_requests)
            .unwrap_or(DEFAULT_RATE_LIMIT_MAX),
        window: parse_duration(
            "rate_limit.window",
            env.rate_limit_window.or(file_rate_limit.window),
            DEFAULT_RATE_LIMIT_WINDOW,
        )?,
    };

    let site = SiteConfig {
        carousel_interval: parse_duration(
            "site.carousel_interval",
            env.carousel_interval.or(file_site.carousel_interval),
            DEFAULT_CAROUSEL_INTERVAL,
        )?,
        layout: LayoutDefaults {
            top_offset_px: env
                .default_top_offset_px
                .or(file_site.default_top_offset_px)
                .unwrap_or(LayoutDefaults::DEFAULT_TOP_OFFSET_PX),
            footer_height_px: env
                .default_footer_height_px
                .or(file_site.default_footer_height_px)
                .unwrap_or(LayoutDefaults::DEFAULT_FOOTER_HEIGHT_PX),
        },
        frame_interval: parse_duration(
            "site.frame_interval",
            env.frame_interval.or(file_site.frame_interval),
            DEFAULT_FRAME_INTERVAL,
        )?,
        hero_image_dir: env
            .hero_image_dir
            .or(file_site.hero_image_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HERO_IMAGE_DIR)),
        hero_image_base: env
            .hero_image_base
            .or(file_site.hero_image_base)
            .unwrap_or_else(|| DEFAULT_HERO_IMAGE_BASE.to_string()),
    };

    let config = Config {
        server,
        database,
        cors,
        security,
        mail,
        admin,
        rate_limit,
        site,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded,
        },
    };

    let guard_warnings = validation::apply_guard_rails(&config)?;
    warnings.extend(guard_warnings);

    Ok((config, warnings))
}

fn parse_duration(
    field: &'static str,
    raw: Option<String>,
    default: &str,
) -> Result<Duration, ConfigLoadError> {
    let value = raw.unwrap_or_else(|| default.to_string());
    humantime::parse_duration(value.trim()).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            field,
            value,
            source,
        }
    })
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}
