use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use shanny_config::CorsConfig;

use crate::{
    handlers::{
        admin::{API_KEY_HEADER, list_messages_handler},
        contact::submit_contact_handler,
        health::health_handler,
        site::site_handler,
    },
    infra::{
        app_state::AppState,
        middleware::{SecurityHeadersLayer, contact_rate_limit},
    },
};

pub const HEALTH: &str = "/health";
pub const SITE: &str = "/api/site";
pub const CONTACT: &str = "/api/contact";
pub const CONTACT_ADMIN_LIST: &str = "/api/contact/admin/list";

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 32 * 1024;

pub fn create_app(state: AppState) -> Router {
    let contact = Router::new()
        .route(CONTACT, post(submit_contact_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            contact_rate_limit,
        ));

    Router::new()
        .route(HEALTH, get(health_handler))
        .route(SITE, get(site_handler))
        .route(CONTACT_ADMIN_LIST, get(list_messages_handler))
        .merge(contact)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(SecurityHeadersLayer::new(&state.config().security))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config().cors))
        .with_state(state)
}

/// Browsers only see CORS headers for configured origins. Requests without
/// an `Origin` header are served unchanged.
pub fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let allow_origin = if cors.is_wildcard_included() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                let origin = origin.trim().trim_end_matches('/');
                HeaderValue::from_str(origin)
                    .inspect_err(|_| warn!(origin, "ignoring invalid CORS origin"))
                    .ok()
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(API_KEY_HEADER),
        ])
}
