use thiserror::Error;
use url::Url;

use crate::models::{Config, CorsConfig, MailConfig};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("rate limit {field} must be greater than zero")]
    ZeroRateLimit { field: &'static str },
    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },
    #[error("invalid URL `{value}` in {field}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("CORS origin `{origin}` must not carry a path")]
    InvalidCorsOrigin { origin: String },
    #[error("layout default {field} must be greater than zero")]
    ZeroLayoutDefault { field: &'static str },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigWarning> {
        self.items.iter()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.rate_limit.max_requests == 0 {
        return Err(ConfigGuardRailError::ZeroRateLimit {
            field: "max_requests",
        });
    }
    if config.rate_limit.window.is_zero() {
        return Err(ConfigGuardRailError::ZeroRateLimit { field: "window" });
    }
    if config.site.carousel_interval.is_zero() {
        return Err(ConfigGuardRailError::ZeroInterval {
            field: "carousel_interval",
        });
    }
    if config.site.frame_interval.is_zero() {
        return Err(ConfigGuardRailError::ZeroInterval {
            field: "frame_interval",
        });
    }
    if config.site.layout.top_offset_px == 0 {
        return Err(ConfigGuardRailError::ZeroLayoutDefault {
            field: "top_offset_px",
        });
    }
    if config.site.layout.footer_height_px == 0 {
        return Err(ConfigGuardRailError::ZeroLayoutDefault {
            field: "footer_height_px",
        });
    }

    if let Some(url) = &config.database.url {
        parse_url("DATABASE_URL", url)?;
    } else {
        warnings.push_with_hint(
            "DATABASE_URL not configured; contact submissions cannot be stored",
            "Set DATABASE_URL or add a [database] url to shanny.toml",
        );
    }

    validate_cors(&config.cors, &mut warnings)?;
    validate_mail(&config.mail, &mut warnings)?;

    if config.admin.api_key.is_none() {
        warnings.push_with_hint(
            "ADMIN_API_KEY not set; the admin message listing rejects every request",
            "Set ADMIN_API_KEY to enable GET /api/contact/admin/list",
        );
    }

    Ok(warnings)
}

fn validate_cors(
    cors: &CorsConfig,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    if cors.is_wildcard_included() {
        warnings.push(
            "CORS wildcard origin configured; any site may post contact forms",
        );
    }

    for origin in cors.allowed_origins.iter().filter(|o| o.trim() != "*") {
        let parsed = parse_url("CORS_ORIGINS", origin)?;
        if parsed.path() != "/" || parsed.query().is_some() {
            return Err(ConfigGuardRailError::InvalidCorsOrigin {
                origin: origin.clone(),
            });
        }
    }

    Ok(())
}

fn validate_mail(
    mail: &MailConfig,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    if !mail.is_configured() {
        warnings.push_with_hint(
            "Mail recipients not configured; contact notifications are disabled",
            "Set EMAIL_FROM and EMAIL_TO to enable notifications",
        );
    }

    if !mail.smtp_complete() {
        warnings.push_with_hint(
            "SMTP not fully configured; outgoing emails will fail",
            "Set SMTP_HOST, SMTP_USER and SMTP_PASS (SMTP_PORT defaults to 587)",
        );
    }

    Ok(())
}

fn parse_url(
    field: &'static str,
    value: &str,
) -> Result<Url, ConfigGuardRailError> {
    Url::parse(value.trim()).map_err(|source| ConfigGuardRailError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}
