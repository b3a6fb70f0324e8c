use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Contact form body exactly as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    /// Captcha token forwarded by the client. Verification is not wired up.
    pub recaptcha_token: Option<String>,
}

/// A contact form that passed validation and sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// Request metadata recorded alongside a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubmissionContext {
    pub ip: String,
    pub user_agent: String,
    pub source: String,
}

impl SubmissionContext {
    pub const DEFAULT_SOURCE: &'static str = "contact-page";
}

/// Row to be inserted into `contact_messages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub submission: ContactSubmission,
    pub context: SubmissionContext,
}

/// Stored contact message as listed to administrators.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub handled: bool,
    pub created_at: DateTime<Utc>,
}
