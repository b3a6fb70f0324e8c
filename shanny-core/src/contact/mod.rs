//! Contact form domain: input validation and owner notification

pub mod mailer;
pub mod notification;
pub mod validation;

pub use lettre::message::Mailbox;
pub use mailer::{
    DEFAULT_SMTP_PORT, DisabledMailer, MailError, Mailer, SmtpMailer, SmtpSettings,
    uses_implicit_tls,
};
pub use notification::{ContactNotification, escape_html};
pub use validation::{
    ContactValidationError, MAX_NAME_CHARS, MAX_PHONE_CHARS, MAX_SUBJECT_CHARS,
    validate_contact_form,
};
