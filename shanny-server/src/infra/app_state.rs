use std::{fmt, sync::Arc};

use shanny_config::Config;
use shanny_core::{
    ContactMessageRepository, Mailer, RateLimiter, SlideDeck,
    model::RateLimitRule,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub contact_messages: Arc<dyn ContactMessageRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// Rule applied to `POST /api/contact`.
    pub contact_rule: Arc<RateLimitRule>,
    pub deck: SlideDeck,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("slides", &self.deck.len())
            .field("mail_enabled", &self.mailer.is_enabled())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        config: Config,
        contact_messages: Arc<dyn ContactMessageRepository>,
        mailer: Arc<dyn Mailer>,
        rate_limiter: Arc<dyn RateLimiter>,
        deck: SlideDeck,
    ) -> Self {
        let contact_rule = Arc::new(config.rate_limit.contact_rule());
        Self {
            config: Arc::new(config),
            contact_messages,
            mailer,
            rate_limiter,
            contact_rule,
            deck,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `true` when `candidate` matches the configured admin key. No key
    /// configured means nobody is authorized.
    pub fn is_admin_key(&self, candidate: Option<&str>) -> bool {
        match (self.config.admin.api_key.as_deref(), candidate) {
            (Some(expected), Some(given)) => {
                constant_time_eq(expected.as_bytes(), given.as_bytes())
            }
            _ => false,
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
