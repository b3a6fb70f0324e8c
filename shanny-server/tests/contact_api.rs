use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::http::StatusCode;
use mockall::mock;
use serde_json::{Value, json};

use shanny_core::{
    ContactNotification, Mailer,
    contact::{DisabledMailer, MailError, Mailbox},
};
use shanny_server::routes;

#[path = "support/mod.rs"]
mod support;

use support::{
    FailingContactRepository, InMemoryContactRepository, RecordingMailer,
    default_config, server, state_with,
};

mock! {
    pub Notifier {}

    #[async_trait]
    impl Mailer for Notifier {
        async fn send(&self, notification: &ContactNotification) -> Result<(), MailError>;
        fn is_enabled(&self) -> bool;
    }
}

fn valid_form() -> Value {
    json!({
        "name": "  Ada Lovelace ",
        "email": "ada@example.com",
        "phone": "",
        "subject": "Website rebuild",
        "message": "  We need a new site.  "
    })
}

#[tokio::test]
async fn valid_submission_is_stored_and_notified() {
    let repository = Arc::new(InMemoryContactRepository::default());
    let (mailer, mut sent) = RecordingMailer::new();
    let server = server(state_with(
        default_config(),
        repository.clone(),
        Arc::new(mailer),
    ));

    let response = server
        .post(routes::CONTACT)
        .add_header("user-agent", "integration-test")
        .add_header("referer", "https://shanny.tech/contact")
        .json(&valid_form())
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));
    assert_eq!(response.header("ratelimit-limit"), "6");
    assert_eq!(response.header("ratelimit-remaining"), "5");

    let stored = repository.stored().await;
    assert_eq!(stored.len(), 1);
    let row = &stored[0];
    assert_eq!(row.submission.name, "Ada Lovelace");
    assert_eq!(row.submission.message, "We need a new site.");
    assert_eq!(row.submission.phone, None);
    assert_eq!(row.context.user_agent, "integration-test");
    assert_eq!(row.context.source, "https://shanny.tech/contact");
    assert_eq!(row.context.ip, "127.0.0.1");

    let notification = tokio::time::timeout(Duration::from_secs(2), sent.recv())
        .await
        .expect("notification sent")
        .expect("mailer channel open");
    assert_eq!(notification.subject, "New contact — Website rebuild");
    assert_eq!(notification.text, "We need a new site.");
}

#[tokio::test]
async fn missing_referer_defaults_source() {
    let repository = Arc::new(InMemoryContactRepository::default());
    let server = server(state_with(
        default_config(),
        repository.clone(),
        Arc::new(DisabledMailer),
    ));

    server
        .post(routes::CONTACT)
        .json(&valid_form())
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(repository.stored().await[0].context.source, "contact-page");
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let repository = Arc::new(InMemoryContactRepository::default());
    let server = server(state_with(
        default_config(),
        repository.clone(),
        Arc::new(DisabledMailer),
    ));

    let response = server
        .post(routes::CONTACT)
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "message": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Name, email and message are required." })
    );
    assert!(repository.stored().await.is_empty());
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let server = server(state_with(
        default_config(),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    let response = server
        .post(routes::CONTACT)
        .json(&json!({ "name": "Ada", "email": "not-an-email", "message": "hi" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Invalid email address." })
    );
}

#[tokio::test]
async fn url_encoded_form_posts_are_accepted() {
    let repository = Arc::new(InMemoryContactRepository::default());
    let server = server(state_with(
        default_config(),
        repository.clone(),
        Arc::new(DisabledMailer),
    ));

    let response = server
        .post(routes::CONTACT)
        .form(&[
            ("name", " Grace Hopper "),
            ("email", "grace@example.com"),
            ("subject", "Audit"),
            ("message", "Please call me."),
        ])
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));

    let stored = repository.stored().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].submission.name, "Grace Hopper");
    assert_eq!(stored[0].submission.subject.as_deref(), Some("Audit"));
}

#[tokio::test]
async fn url_encoded_form_is_validated_like_json() {
    let server = server(state_with(
        default_config(),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    let response = server
        .post(routes::CONTACT)
        .form(&[("name", "Grace"), ("email", "nope"), ("message", "hi")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Invalid email address." })
    );
}

#[tokio::test]
async fn non_string_fields_are_a_bad_request() {
    let server = server(state_with(
        default_config(),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    let response = server
        .post(routes::CONTACT)
        .json(&json!({ "name": 42, "email": "ada@example.com", "message": "hi" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Invalid request body." })
    );
}

#[tokio::test]
async fn seventh_request_in_window_is_rate_limited() {
    let server = server(state_with(
        default_config(),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    for _ in 0..6 {
        server
            .post(routes::CONTACT)
            .json(&valid_form())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server.post(routes::CONTACT).json(&valid_form()).await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Too many contact requests, please try again later." })
    );
    assert_eq!(response.header("ratelimit-remaining"), "0");
    let retry_after: u64 = response
        .header("retry-after")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 300);
}

#[tokio::test]
async fn invalid_submissions_still_count_toward_the_limit() {
    let server = server(state_with(
        default_config(),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    for _ in 0..6 {
        server
            .post(routes::CONTACT)
            .json(&json!({}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    server
        .post(routes::CONTACT)
        .json(&valid_form())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn storage_failure_is_a_generic_server_error() {
    let mut notifier = MockNotifier::new();
    notifier.expect_is_enabled().return_const(true);
    notifier.expect_send().never();

    let server = server(state_with(
        default_config(),
        Arc::new(FailingContactRepository),
        Arc::new(notifier),
    ));

    let response = server.post(routes::CONTACT).json(&valid_form()).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "Server error" }));
}

#[tokio::test]
async fn mail_failure_does_not_change_the_response() {
    let (done_tx, mut done_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut notifier = MockNotifier::new();
    notifier.expect_is_enabled().return_const(true);
    notifier.expect_send().times(1).returning(move |_| {
        let _ = done_tx.send(());
        let bad = "not an address".parse::<Mailbox>().unwrap_err();
        Err(MailError::from(bad))
    });

    let repository = Arc::new(InMemoryContactRepository::default());
    let server = server(state_with(
        default_config(),
        repository.clone(),
        Arc::new(notifier),
    ));

    server
        .post(routes::CONTACT)
        .json(&valid_form())
        .await
        .assert_status(StatusCode::CREATED);

    tokio::time::timeout(Duration::from_secs(2), done_rx.recv())
        .await
        .expect("mailer invoked")
        .expect("channel open");
    assert_eq!(repository.stored().await.len(), 1);
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let server = server(state_with(
        default_config(),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    let response = server
        .post(routes::CONTACT)
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "x".repeat(routes::BODY_LIMIT_BYTES + 1),
        }))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let server = server(state_with(
        default_config(),
        Arc::new(InMemoryContactRepository::default()),
        Arc::new(DisabledMailer),
    ));

    let response = server.get(routes::HEALTH).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-frame-options"), "SAMEORIGIN");
    assert!(!response.headers().contains_key("strict-transport-security"));
}
