pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

use shanny_model::{LayoutDefaults, RateLimitRule};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub security: SecurityConfig,
    pub mail: MailConfig,
    pub admin: AdminConfig,
    pub rate_limit: RateLimitConfig,
    pub site: SiteConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins
            .iter()
            .any(|origin| origin.trim() == "*")
    }
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Honour `X-Forwarded-For` when identifying clients.
    pub trust_proxy_headers: bool,
    pub hsts: HstsSettings,
}

#[derive(Debug, Clone)]
pub struct HstsSettings {
    pub max_age: u64,
    pub include_subdomains: bool,
    pub preload: bool,
}

impl HstsSettings {
    /// Value for the `Strict-Transport-Security` header.
    pub fn header_value(&self) -> String {
        let mut value = format!("max-age={}", self.max_age);
        if self.include_subdomains {
            value.push_str("; includeSubDomains");
        }
        if self.preload {
            value.push_str("; preload");
        }
        value
    }
}

/// Outgoing notification mail over SMTP. Sending is disabled unless both
/// `from` and `to` are present.
#[derive(Clone)]
pub struct MailConfig {
    pub from: Option<String>,
    pub to: Option<String>,
    /// `None` falls back to `localhost`.
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub timeout: Duration,
}

impl MailConfig {
    pub fn is_configured(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Host and both credentials are set.
    pub fn smtp_complete(&self) -> bool {
        self.smtp_host.is_some() && self.smtp_user.is_some() && self.smtp_pass.is_some()
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_pass", &self.smtp_pass.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct AdminConfig {
    pub api_key: Option<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimitConfig {
    /// Rule applied to contact form submissions.
    pub fn contact_rule(&self) -> RateLimitRule {
        RateLimitRule {
            limit: self.max_requests,
            window: self.window,
            ..RateLimitRule::contact()
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub carousel_interval: Duration,
    pub layout: LayoutDefaults,
    pub frame_interval: Duration,
    /// Directory scanned for hero images.
    pub hero_image_dir: PathBuf,
    /// Public path prefix for discovered hero images.
    pub hero_image_base: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsts_header_includes_enabled_directives() {
        let hsts = HstsSettings {
            max_age: 600,
            include_subdomains: true,
            preload: false,
        };
        assert_eq!(hsts.header_value(), "max-age=600; includeSubDomains");
    }

    #[test]
    fn contact_rule_uses_configured_limits() {
        let rule = RateLimitConfig {
            max_requests: 3,
            window: Duration::from_secs(60),
        }
        .contact_rule();
        assert_eq!(rule.name, "contact");
        assert_eq!(rule.limit, 3);
        assert_eq!(rule.window, Duration::from_secs(60));
    }

    #[test]
    fn secrets_are_masked_in_debug_output() {
        let admin = AdminConfig {
            api_key: Some("hunter2".into()),
        };
        assert!(!format!("{admin:?}").contains("hunter2"));

        let mail = MailConfig {
            from: Some("site@shanny.tech".into()),
            to: Some("hello@shanny.tech".into()),
            smtp_host: Some("smtp.shanny.tech".into()),
            smtp_port: 587,
            smtp_user: Some("mailer".into()),
            smtp_pass: Some("hunter2".into()),
            timeout: Duration::from_secs(10),
        };
        let rendered = format!("{mail:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("smtp.shanny.tech"));
    }
}
