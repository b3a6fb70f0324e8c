//! Per-client throttling for the contact endpoint
//!
//! Wraps the core [`RateLimiter`](shanny_core::RateLimiter) as an axum
//! middleware. Limiter failures fail open; the request is logged and served.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, header::RETRY_AFTER},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shanny_core::{RateLimitDecision, model::RateLimitKey};
use tracing::warn;

use crate::infra::{app_state::AppState, errors::AppError};

pub const RATE_LIMITED_MESSAGE: &str =
    "Too many contact requests, please try again later.";

const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
const RATELIMIT_REMAINING: HeaderName =
    HeaderName::from_static("ratelimit-remaining");
const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Address the request is attributed to, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl ClientIp {
    /// First `X-Forwarded-For` entry when proxy headers are trusted,
    /// otherwise the peer address.
    pub fn resolve(
        headers: &HeaderMap,
        peer: Option<SocketAddr>,
        trust_proxy_headers: bool,
    ) -> Self {
        if trust_proxy_headers
            && let Some(forwarded) = headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.split(',').next())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        {
            return Self(Some(forwarded.to_string()));
        }
        Self(peer.map(|addr| addr.ip().to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or_default()
    }

    fn key(&self) -> RateLimitKey {
        match &self.0 {
            Some(ip) => RateLimitKey::IpAddress(ip.clone()),
            None => RateLimitKey::Custom("unknown".to_string()),
        }
    }
}

pub async fn contact_rate_limit(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = ClientIp::resolve(
        req.headers(),
        peer,
        state.config().security.trust_proxy_headers,
    );
    let key = client.key();
    req.extensions_mut().insert(client);

    match state
        .rate_limiter
        .check_and_update(&key, &state.contact_rule)
        .await
    {
        Ok(decision) if decision.allowed => {
            let mut response = next.run(req).await;
            apply_headers(response.headers_mut(), &decision);
            response
        }
        Ok(decision) => {
            warn!(
                client = ?key,
                count = decision.current_count,
                "contact submission rate limited"
            );
            let mut response =
                AppError::rate_limited(RATE_LIMITED_MESSAGE).into_response();
            let headers = response.headers_mut();
            apply_headers(headers, &decision);
            headers.insert(RETRY_AFTER, number(decision.retry_after_secs()));
            response
        }
        Err(err) => {
            warn!(error = %err, "rate limiter error, allowing request");
            next.run(req).await
        }
    }
}

fn apply_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(RATELIMIT_LIMIT, number(decision.limit.into()));
    headers.insert(RATELIMIT_REMAINING, number(decision.remaining.into()));
    headers.insert(RATELIMIT_RESET, number(decision.retry_after_secs()));
}

fn number(value: u64) -> HeaderValue {
    HeaderValue::from(value)
}
