use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use shanny_config::{Config, MailConfig};
use shanny_core::{
    FixedWindowRateLimiter, Mailer, SlideDeck,
    assets::discover_hero_images,
    contact::{DisabledMailer, SmtpMailer, SmtpSettings},
    database::{PostgresContactMessageRepository, connect_pool},
};

use crate::infra::app_state::AppState;

/// SMTP host used when none is configured.
pub const DEFAULT_SMTP_HOST: &str = "localhost";

/// How often expired rate limit windows are dropped.
pub const RATE_LIMIT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[async_trait]
pub trait StartupHooks: Send + Sync {
    async fn run(&self, state: &AppState) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct ProdStartupHooks;

#[async_trait]
impl StartupHooks for ProdStartupHooks {
    async fn run(&self, state: &AppState) -> Result<()> {
        if !state.mailer.is_enabled() {
            warn!("contact notifications disabled; messages are only stored");
        }

        let limiter = Arc::clone(&state.rate_limiter);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(RATE_LIMIT_SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                match limiter.cleanup_expired().await {
                    Ok(0) => {}
                    Ok(removed) => {
                        debug!(removed, "dropped expired rate limit windows")
                    }
                    Err(err) => {
                        warn!(error = %err, "rate limit cleanup failed")
                    }
                }
            }
        });

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NoopStartupHooks;

#[async_trait]
impl StartupHooks for NoopStartupHooks {
    async fn run(&self, _state: &AppState) -> Result<()> {
        Ok(())
    }
}

/// Connects storage, builds the mailer and resolves the hero deck.
pub async fn build_state(config: Config) -> Result<AppState> {
    let database_url = config
        .database
        .url
        .clone()
        .ok_or_else(|| anyhow!("DATABASE_URL is required to run the server"))?;
    let pool = connect_pool(&database_url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;

    let mailer = build_mailer(&config.mail)?;
    let deck = load_hero_deck(&config)?;
    info!(slides = deck.len(), "hero deck resolved");

    Ok(AppState::new(
        config,
        Arc::new(PostgresContactMessageRepository::new(pool)),
        mailer,
        Arc::new(FixedWindowRateLimiter::new()),
        deck,
    ))
}

/// Returns a [`DisabledMailer`] unless both sender and recipient are set.
pub fn build_mailer(mail: &MailConfig) -> Result<Arc<dyn Mailer>> {
    let (Some(from), Some(to)) = (&mail.from, &mail.to) else {
        return Ok(Arc::new(DisabledMailer));
    };

    let settings = SmtpSettings {
        host: mail
            .smtp_host
            .clone()
            .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
        port: mail.smtp_port,
        username: mail.smtp_user.clone(),
        password: mail.smtp_pass.clone(),
        from: from.clone(),
        to: to.clone(),
        timeout: mail.timeout,
    };
    let mailer =
        SmtpMailer::new(settings).context("failed to build SMTP mailer")?;
    info!(?mailer, "contact notifications enabled");
    Ok(Arc::new(mailer))
}

pub fn load_hero_deck(config: &Config) -> Result<SlideDeck> {
    let images = discover_hero_images(
        &config.site.hero_image_dir,
        &config.site.hero_image_base,
    )
    .with_context(|| {
        format!(
            "failed to scan hero images in {}",
            config.site.hero_image_dir.display()
        )
    })?;
    if images.is_empty() {
        warn!(
            dir = %config.site.hero_image_dir.display(),
            "no hero images found; slides render without backgrounds"
        );
    }
    SlideDeck::hero(images).context("hero slide copy is invalid")
}
