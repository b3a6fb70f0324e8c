use once_cell::sync::Lazy;
use regex::Regex;
use shanny_model::{ContactForm, ContactSubmission};
use thiserror::Error;

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_PHONE_CHARS: usize = 40;
pub const MAX_SUBJECT_CHARS: usize = 250;
const MAX_EMAIL_CHARS: usize = 254;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("email pattern is valid")
});

/// Rejections surfaced to the submitter verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    #[error("Name, email and message are required.")]
    MissingRequired,

    #[error("Invalid email address.")]
    InvalidEmail,
}

/// Trims and bounds a raw form into a submission.
///
/// Required fields are checked after trimming, so whitespace-only input is
/// treated as missing. Over-long fields are truncated, not rejected.
pub fn validate_contact_form(
    form: &ContactForm,
) -> Result<ContactSubmission, ContactValidationError> {
    let name = trimmed(form.name.as_deref());
    let email = trimmed(form.email.as_deref());
    let message = trimmed(form.message.as_deref());

    let (Some(name), Some(email), Some(message)) = (name, email, message) else {
        return Err(ContactValidationError::MissingRequired);
    };

    if !is_valid_email(email) {
        return Err(ContactValidationError::InvalidEmail);
    }

    Ok(ContactSubmission {
        name: truncate(name, MAX_NAME_CHARS),
        email: email.to_string(),
        phone: trimmed(form.phone.as_deref())
            .map(|phone| truncate(phone, MAX_PHONE_CHARS)),
        subject: trimmed(form.subject.as_deref())
            .map(|subject| truncate(subject, MAX_SUBJECT_CHARS)),
        message: message.to_string(),
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_CHARS
        && !email.contains("..")
        && EMAIL_PATTERN.is_match(email)
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
