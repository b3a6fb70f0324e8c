#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use shanny_config::{Config, ConfigLoader, EnvConfig};
use shanny_core::{
    ContactMessageRepository, ContactNotification, FixedWindowRateLimiter,
    Mailer, RepositoryError, SlideDeck,
    contact::MailError,
    database::RepositoryResult,
    model::{ContactMessage, NewContactMessage},
};
use shanny_server::{AppState, create_app};

pub const ADMIN_KEY: &str = "test-admin-key";

/// Configuration as the loader would produce it from `vars`.
pub fn config_with(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ConfigLoader::new()
        .load_with_env(EnvConfig::from_lookup(|name| vars.get(name).cloned()), false)
        .expect("test configuration loads")
        .config
}

pub fn default_config() -> Config {
    config_with(&[("ADMIN_API_KEY", ADMIN_KEY)])
}

#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    rows: Mutex<Vec<(ContactMessage, NewContactMessage)>>,
}

impl InMemoryContactRepository {
    pub async fn stored(&self) -> Vec<NewContactMessage> {
        self.rows
            .lock()
            .await
            .iter()
            .map(|(_, new)| new.clone())
            .collect()
    }
}

#[async_trait]
impl ContactMessageRepository for InMemoryContactRepository {
    async fn insert(
        &self,
        message: NewContactMessage,
    ) -> RepositoryResult<ContactMessage> {
        let stored = ContactMessage {
            id: Uuid::now_v7(),
            name: message.submission.name.clone(),
            email: message.submission.email.clone(),
            phone: message.submission.phone.clone(),
            subject: message.submission.subject.clone(),
            message: message.submission.message.clone(),
            handled: false,
            created_at: Utc::now(),
        };
        self.rows.lock().await.push((stored.clone(), message));
        Ok(stored)
    }

    async fn list_recent(
        &self,
        limit: u32,
    ) -> RepositoryResult<Vec<ContactMessage>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .rev()
            .take(limit as usize)
            .map(|(stored, _)| stored.clone())
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct FailingContactRepository;

#[async_trait]
impl ContactMessageRepository for FailingContactRepository {
    async fn insert(
        &self,
        _message: NewContactMessage,
    ) -> RepositoryResult<ContactMessage> {
        Err(RepositoryError::Database("connection reset".into()))
    }

    async fn list_recent(
        &self,
        _limit: u32,
    ) -> RepositoryResult<Vec<ContactMessage>> {
        Err(RepositoryError::Database("connection reset".into()))
    }
}

/// Forwards every notification to a channel the test can await.
#[derive(Debug)]
pub struct RecordingMailer {
    sent: mpsc::UnboundedSender<ContactNotification>,
}

impl RecordingMailer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ContactNotification>) {
        let (sent, rx) = mpsc::unbounded_channel();
        (Self { sent }, rx)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        notification: &ContactNotification,
    ) -> Result<(), MailError> {
        let _ = self.sent.send(notification.clone());
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

pub fn state_with(
    config: Config,
    repository: Arc<dyn ContactMessageRepository>,
    mailer: Arc<dyn Mailer>,
) -> AppState {
    let deck = SlideDeck::hero(["/hero/b.jpg", "/hero/a.jpg"])
        .expect("hero copy is valid");
    AppState::new(
        config,
        repository,
        mailer,
        Arc::new(FixedWindowRateLimiter::new()),
        deck,
    )
}

pub fn server(state: AppState) -> TestServer {
    let make_service =
        create_app(state).into_make_service_with_connect_info::<SocketAddr>();
    TestServer::builder()
        .http_transport()
        .build(make_service)
        .expect("test server starts")
}
