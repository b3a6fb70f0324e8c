//! Hardening headers for every response
//!
//! Sets `X-Content-Type-Options`, `X-Frame-Options` and `Referrer-Policy`
//! unconditionally. `Strict-Transport-Security` is only added to HTTPS
//! responses; `X-Forwarded-Proto` counts when proxy headers are trusted.

use axum::{
    extract::Request,
    http::{HeaderValue, Response, header},
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::debug;

use shanny_config::{HstsSettings, SecurityConfig};

#[derive(Clone, Debug)]
pub struct SecurityHeadersLayer {
    hsts: HeaderValue,
    trust_proxy_headers: bool,
}

impl SecurityHeadersLayer {
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            hsts: Self::build_hsts_value(&config.hsts),
            trust_proxy_headers: config.trust_proxy_headers,
        }
    }

    fn build_hsts_value(settings: &HstsSettings) -> HeaderValue {
        HeaderValue::from_str(&settings.header_value())
            .unwrap_or_else(|_| HeaderValue::from_static("max-age=31536000"))
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        debug!(hsts = ?self.hsts, "installing security headers layer");
        SecurityHeaders {
            inner,
            hsts: self.hsts.clone(),
            trust_proxy_headers: self.trust_proxy_headers,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SecurityHeaders<S> {
    inner: S,
    hsts: HeaderValue,
    trust_proxy_headers: bool,
}

impl<S> SecurityHeaders<S> {
    fn is_https(&self, req: &Request) -> bool {
        if req.uri().scheme_str() == Some("https") {
            return true;
        }

        self.trust_proxy_headers
            && req
                .headers()
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
    }
}

impl<S, B> Service<Request> for SecurityHeaders<S>
where
    S: Service<Request, Response = Response<B>> + Send + Clone + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = Response<B>;
    type Error = S::Error;
    type Future = Pin<
        Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let is_https = self.is_https(&req);
        let hsts = self.hsts.clone();

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            let headers = response.headers_mut();
            headers.insert(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            );
            headers.insert(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("SAMEORIGIN"),
            );
            headers.insert(
                header::REFERRER_POLICY,
                HeaderValue::from_static("no-referrer"),
            );
            if is_https {
                headers.insert(header::STRICT_TRANSPORT_SECURITY, hsts);
            }
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use axum::body::Body;
    use tower::{ServiceExt, service_fn};

    use super::*;

    fn security(trust_proxy_headers: bool) -> SecurityConfig {
        SecurityConfig {
            trust_proxy_headers,
            hsts: HstsSettings {
                max_age: 31_536_000,
                include_subdomains: true,
                preload: false,
            },
        }
    }

    async fn call(layer: SecurityHeadersLayer, req: Request) -> Response<Body> {
        let service = layer.layer(service_fn(|_req: Request| async {
            Ok::<_, Infallible>(Response::new(Body::empty()))
        }));
        service.oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn plain_http_gets_basic_headers_only() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = call(SecurityHeadersLayer::new(&security(false)), req).await;

        let headers = response.headers();
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "SAMEORIGIN");
        assert_eq!(headers[header::REFERRER_POLICY], "no-referrer");
        assert!(!headers.contains_key(header::STRICT_TRANSPORT_SECURITY));
    }

    #[tokio::test]
    async fn forwarded_https_gets_hsts_when_trusted() {
        let req = || {
            Request::builder()
                .uri("/health")
                .header("x-forwarded-proto", "https")
                .body(Body::empty())
                .unwrap()
        };

        let trusted = call(SecurityHeadersLayer::new(&security(true)), req()).await;
        assert_eq!(
            trusted.headers()[header::STRICT_TRANSPORT_SECURITY],
            "max-age=31536000; includeSubDomains"
        );

        let untrusted =
            call(SecurityHeadersLayer::new(&security(false)), req()).await;
        assert!(
            !untrusted
                .headers()
                .contains_key(header::STRICT_TRANSPORT_SECURITY)
        );
    }
}
