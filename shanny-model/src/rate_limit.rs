use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier for rate limiting.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RateLimitKey {
    /// Client address as resolved by the HTTP layer.
    IpAddress(String),
    /// Fallback bucket, e.g. when no address is known.
    Custom(String),
}

impl RateLimitKey {
    /// Create a namespaced key for the limiter's store.
    pub fn to_cache_key(&self, namespace: &str) -> String {
        match self {
            Self::IpAddress(ip) => format!("{}:ip:{}", namespace, ip),
            Self::Custom(key) => format!("{}:custom:{}", namespace, key),
        }
    }
}

/// How many hits a key may make per window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RateLimitRule {
    /// Namespace for keys counted under this rule.
    pub name: String,
    pub limit: u32,
    pub window: Duration,
}

impl RateLimitRule {
    /// Contact form submissions: 6 requests per 5 minutes per client.
    pub fn contact() -> Self {
        Self {
            name: "contact".to_string(),
            limit: 6,
            window: Duration::from_secs(5 * 60),
        }
    }
}

impl Default for RateLimitRule {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            limit: 10,
            window: Duration::from_secs(60),
        }
    }
}
