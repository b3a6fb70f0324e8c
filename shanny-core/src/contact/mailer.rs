use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, Mailboxes, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::debug;

use super::notification::ContactNotification;

/// Submission port used when none is configured.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTPS port; connections to it use implicit TLS instead of STARTTLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build notification message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivers contact notifications to the site owner.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &ContactNotification) -> Result<(), MailError>;

    /// `false` when sending is a no-op.
    fn is_enabled(&self) -> bool;
}

/// Used when no sender or recipient is configured. Every send succeeds
/// without doing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, notification: &ContactNotification) -> Result<(), MailError> {
        debug!(subject = %notification.subject, "mail disabled, notification dropped");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    /// One address or a comma-separated list.
    pub to: String,
    pub timeout: Duration,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("from", &self.from)
            .field("to", &self.to)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub fn uses_implicit_tls(port: u16) -> bool {
    port == IMPLICIT_TLS_PORT
}

/// Sends notifications over SMTP as plain text with an HTML alternative.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailboxes,
    settings: SmtpSettings,
}

impl SmtpMailer {
    /// Parses the addresses and prepares a pooled transport. No connection is
    /// opened until the first send.
    pub fn new(settings: SmtpSettings) -> Result<Self, MailError> {
        let from: Mailbox = settings.from.parse()?;
        let to: Mailboxes = settings.to.parse()?;

        let builder = if uses_implicit_tls(settings.port) {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };
        let mut builder = builder
            .port(settings.port)
            .timeout(Some(settings.timeout));
        if let (Some(user), Some(pass)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
            settings,
        })
    }

    pub fn settings(&self) -> &SmtpSettings {
        &self.settings
    }

    fn message(&self, notification: &ContactNotification) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(notification.subject.clone());
        for mailbox in self.to.iter() {
            builder = builder.to(mailbox.clone());
        }
        let body = MultiPart::alternative_plain_html(
            notification.text.clone(),
            notification.html.clone(),
        );
        Ok(builder.multipart(body)?)
    }
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.settings.host)
            .field("port", &self.settings.port)
            .field("implicit_tls", &uses_implicit_tls(self.settings.port))
            .field("from", &self.settings.from)
            .field("to", &self.settings.to)
            .field("has_credentials", &self.settings.password.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &ContactNotification) -> Result<(), MailError> {
        let message = self.message(notification)?;
        let response = self.transport.send(message).await?;
        debug!(
            subject = %notification.subject,
            code = %response.code(),
            "contact notification sent"
        );
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: "smtp.shanny.tech".to_string(),
            port: DEFAULT_SMTP_PORT,
            username: Some("mailer".to_string()),
            password: Some("s3cret".to_string()),
            from: "Shanny Site <site@shanny.tech>".to_string(),
            to: "hello@shanny.tech, ops@shanny.tech".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn note() -> ContactNotification {
        ContactNotification {
            subject: "New contact — General inquiry".to_string(),
            text: "hi".to_string(),
            html: "<pre>hi</pre>".to_string(),
        }
    }

    #[tokio::test]
    async fn disabled_mailer_accepts_everything() {
        let mailer = DisabledMailer;
        assert!(mailer.send(&note()).await.is_ok());
        assert!(!mailer.is_enabled());
    }

    #[test]
    fn only_port_465_uses_implicit_tls() {
        assert!(uses_implicit_tls(465));
        assert!(!uses_implicit_tls(DEFAULT_SMTP_PORT));
        assert!(!uses_implicit_tls(25));
    }

    #[tokio::test]
    async fn rejects_malformed_sender() {
        let err = SmtpMailer::new(SmtpSettings {
            from: "not an address".to_string(),
            ..settings()
        })
        .unwrap_err();
        assert!(matches!(err, MailError::Address(_)));
    }

    #[tokio::test]
    async fn debug_output_hides_the_password() {
        let mailer = SmtpMailer::new(settings()).unwrap();
        let rendered = format!("{mailer:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("has_credentials: true"));
        assert!(rendered.contains("implicit_tls: false"));

        let rendered = format!("{:?}", mailer.settings());
        assert!(!rendered.contains("s3cret"));
    }

    #[tokio::test]
    async fn message_addresses_every_recipient() {
        let mailer = SmtpMailer::new(settings()).unwrap();
        let message = mailer.message(&note()).unwrap();
        assert_eq!(message.envelope().to().len(), 2);
        assert_eq!(
            message.envelope().from().map(ToString::to_string).as_deref(),
            Some("site@shanny.tech")
        );
    }
}
