use std::sync::Arc;

use serde_json::{Value, json};

use shanny_core::contact::DisabledMailer;
use shanny_server::routes;

#[path = "support/mod.rs"]
mod support;

use support::{InMemoryContactRepository, config_with, server, state_with};

#[tokio::test]
async fn health_reports_ok() {
    let server = server(state_with(
        config_with(&[]),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    let response = server.get(routes::HEALTH).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));
}

#[tokio::test]
async fn site_bootstrap_serves_sorted_slides_and_defaults() {
    let server = server(state_with(
        config_with(&[]),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    let response = server.get(routes::SITE).await;
    response.assert_status_ok();
    let body = response.json::<Value>();

    let slides = body["slides"].as_array().expect("slides array");
    assert_eq!(slides.len(), 3);
    assert_eq!(slides[0]["id"], "slide-1");
    assert_eq!(slides[0]["image"], "/hero/a.jpg");
    assert_eq!(slides[1]["image"], "/hero/b.jpg");
    // Fewer images than slides: the rest reuse the first image.
    assert_eq!(slides[2]["image"], "/hero/a.jpg");
    assert_eq!(slides[0]["callToActionTarget"], "/contact");

    assert_eq!(body["carouselIntervalMs"], 4200);
    assert_eq!(body["frameIntervalMs"], 16);
    assert_eq!(
        body["layout"],
        json!({ "topOffsetPx": 88, "footerHeightPx": 88 })
    );
}

#[tokio::test]
async fn site_bootstrap_reflects_configured_intervals() {
    let server = server(state_with(
        config_with(&[
            ("CAROUSEL_INTERVAL", "6s"),
            ("LAYOUT_TOP_OFFSET_PX", "120"),
        ]),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    let body = server.get(routes::SITE).await.json::<Value>();
    assert_eq!(body["carouselIntervalMs"], 6000);
    assert_eq!(body["layout"]["topOffsetPx"], 120);
    assert_eq!(body["layout"]["footerHeightPx"], 88);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let server = server(state_with(
        config_with(&[("CORS_ORIGINS", "https://shanny.tech")]),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    let response = server
        .get(routes::HEALTH)
        .add_header("origin", "https://shanny.tech")
        .await;
    assert_eq!(
        response.header("access-control-allow-origin"),
        "https://shanny.tech"
    );

    let response = server
        .get(routes::HEALTH)
        .add_header("origin", "https://evil.example")
        .await;
    response.assert_status_ok();
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}
