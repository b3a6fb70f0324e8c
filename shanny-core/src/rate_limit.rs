//! Rate limiting for public endpoints
//!
//! A fixed-window counter kept in memory. Each key gets a window starting at
//! its first request; requests beyond the rule's limit are rejected until the
//! window ends.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use shanny_model::{RateLimitKey, RateLimitRule};
use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

/// Errors that can occur during rate limiting operations
#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rate limiting operations
pub type RateLimitResult<T> = Result<T, RateLimitError>;

/// Decision returned by rate limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request is allowed
    pub allowed: bool,

    /// Requests seen in the current window, including this one
    pub current_count: u32,

    /// Maximum allowed requests
    pub limit: u32,

    /// Requests left in the current window
    pub remaining: u32,

    /// Time until the window resets
    pub reset_after: Duration,
}

impl RateLimitDecision {
    /// Whole seconds until reset, rounded up, for `Retry-After`.
    pub fn retry_after_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

/// Rate limiter trait for implementing different backends
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if a request is allowed and update counters
    async fn check_and_update(
        &self,
        key: &RateLimitKey,
        rule: &RateLimitRule,
    ) -> RateLimitResult<RateLimitDecision>;

    /// Reset rate limit for a specific key
    async fn reset(
        &self,
        key: &RateLimitKey,
        rule: &RateLimitRule,
    ) -> RateLimitResult<()>;

    /// Clean up expired entries (maintenance operation)
    async fn cleanup_expired(&self) -> RateLimitResult<u64>;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    length: Duration,
    count: u32,
}

impl Window {
    fn ends_at(&self) -> Instant {
        self.started + self.length
    }
}

/// In-memory fixed-window limiter.
#[derive(Debug, Default)]
pub struct FixedWindowRateLimiter {
    windows: DashMap<String, Window>,
}

impl FixedWindowRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }

    fn validate(rule: &RateLimitRule) -> RateLimitResult<()> {
        if rule.limit == 0 || rule.window.is_zero() {
            return Err(RateLimitError::ConfigError(format!(
                "rule '{}' needs a non-zero limit and window",
                rule.name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RateLimiter for FixedWindowRateLimiter {
    async fn check_and_update(
        &self,
        key: &RateLimitKey,
        rule: &RateLimitRule,
    ) -> RateLimitResult<RateLimitDecision> {
        Self::validate(rule)?;

        let now = Instant::now();
        let cache_key = key.to_cache_key(&rule.name);
        let mut entry = self.windows.entry(cache_key).or_insert(Window {
            started: now,
            length: rule.window,
            count: 0,
        });

        if now >= entry.ends_at() {
            *entry = Window {
                started: now,
                length: rule.window,
                count: 0,
            };
        }
        entry.count = entry.count.saturating_add(1);

        let decision = RateLimitDecision {
            allowed: entry.count <= rule.limit,
            current_count: entry.count,
            limit: rule.limit,
            remaining: rule.limit.saturating_sub(entry.count),
            reset_after: entry.ends_at().saturating_duration_since(now),
        };

        if !decision.allowed {
            debug!(
                rule = %rule.name,
                count = decision.current_count,
                "rate limit exceeded"
            );
        }
        Ok(decision)
    }

    async fn reset(
        &self,
        key: &RateLimitKey,
        rule: &RateLimitRule,
    ) -> RateLimitResult<()> {
        self.windows.remove(&key.to_cache_key(&rule.name));
        Ok(())
    }

    async fn cleanup_expired(&self) -> RateLimitResult<u64> {
        let now = Instant::now();
        let before = self.windows.len();
        self.windows.retain(|_, window| now < window.ends_at());
        Ok(before.saturating_sub(self.windows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(ip: &str) -> RateLimitKey {
        RateLimitKey::IpAddress(ip.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn contact_rule_allows_six_then_blocks() {
        let limiter = FixedWindowRateLimiter::new();
        let rule = RateLimitRule::contact();
        let key = client("10.0.0.1");

        for i in 1..=6 {
            let decision = limiter.check_and_update(&key, &rule).await.unwrap();
            assert!(decision.allowed, "request {i} should be allowed");
            assert_eq!(decision.remaining, 6 - i);
        }

        let blocked = limiter.check_and_update(&key, &rule).await.unwrap();
        assert!(!blocked.allowed);
        assert_eq!(blocked.remaining, 0);
        assert_eq!(blocked.retry_after_secs(), 300);
    }

    #[tokio::test(start_paused = true)]
    async fn window_resets_after_expiry() {
        let limiter = FixedWindowRateLimiter::new();
        let rule = RateLimitRule::contact();
        let key = client("10.0.0.2");

        for _ in 0..7 {
            limiter.check_and_update(&key, &rule).await.unwrap();
        }

        tokio::time::sleep(Duration::from_secs(120)).await;
        let still_blocked = limiter.check_and_update(&key, &rule).await.unwrap();
        assert!(!still_blocked.allowed);
        assert_eq!(still_blocked.reset_after, Duration::from_secs(180));

        tokio::time::sleep(Duration::from_secs(180)).await;
        let fresh = limiter.check_and_update(&key, &rule).await.unwrap();
        assert!(fresh.allowed);
        assert_eq!(fresh.current_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn keys_are_independent() {
        let limiter = FixedWindowRateLimiter::new();
        let rule = RateLimitRule {
            limit: 1,
            ..RateLimitRule::contact()
        };

        assert!(limiter.check_and_update(&client("a"), &rule).await.unwrap().allowed);
        assert!(!limiter.check_and_update(&client("a"), &rule).await.unwrap().allowed);
        assert!(limiter.check_and_update(&client("b"), &rule).await.unwrap().allowed);

        limiter.reset(&client("a"), &rule).await.unwrap();
        assert!(limiter.check_and_update(&client("a"), &rule).await.unwrap().allowed);
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_drops_expired_windows() {
        let limiter = FixedWindowRateLimiter::new();
        let rule = RateLimitRule::contact();
        limiter.check_and_update(&client("a"), &rule).await.unwrap();
        tokio::time::sleep(Duration::from_secs(200)).await;
        limiter.check_and_update(&client("b"), &rule).await.unwrap();
        tokio::time::sleep(Duration::from_secs(150)).await;

        assert_eq!(limiter.cleanup_expired().await.unwrap(), 1);
        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[tokio::test]
    async fn zero_limit_is_a_config_error() {
        let limiter = FixedWindowRateLimiter::new();
        let rule = RateLimitRule {
            limit: 0,
            ..RateLimitRule::default()
        };
        let err = limiter
            .check_and_update(&client("a"), &rule)
            .await
            .unwrap_err();
        assert!(matches!(err, RateLimitError::ConfigError(_)));
    }
}
