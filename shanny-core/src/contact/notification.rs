use shanny_model::ContactSubmission;

const FALLBACK_SUBJECT: &str = "General inquiry";

/// Rendered owner notification for one contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNotification {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ContactNotification {
    pub fn for_submission(submission: &ContactSubmission) -> Self {
        let subject = format!(
            "New contact — {}",
            submission.subject.as_deref().unwrap_or(FALLBACK_SUBJECT)
        );

        let html = format!(
            "<h3>New contact message</h3>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Phone:</strong> {}</p>\n\
             <p><strong>Subject:</strong> {}</p>\n\
             <hr/>\n\
             <pre>{}</pre>\n",
            escape_html(&submission.name),
            escape_html(&submission.email),
            escape_html(submission.phone.as_deref().unwrap_or_default()),
            escape_html(submission.subject.as_deref().unwrap_or_default()),
            escape_html(&submission.message),
        );

        Self {
            subject,
            text: submission.message.clone(),
            html,
        }
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(subject: Option<&str>) -> ContactSubmission {
        ContactSubmission {
            name: "<b>Eve</b>".to_string(),
            email: "eve@example.com".to_string(),
            phone: None,
            subject: subject.map(str::to_string),
            message: "Tom & Jerry's \"quote\"".to_string(),
        }
    }

    #[test]
    fn subject_falls_back_to_general_inquiry() {
        let note = ContactNotification::for_submission(&submission(None));
        assert_eq!(note.subject, "New contact — General inquiry");

        let note = ContactNotification::for_submission(&submission(Some("Pricing")));
        assert_eq!(note.subject, "New contact — Pricing");
    }

    #[test]
    fn html_fields_are_escaped_and_text_is_raw() {
        let note = ContactNotification::for_submission(&submission(None));
        assert!(note.html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(note.html.contains("Tom &amp; Jerry&#39;s &quot;quote&quot;"));
        assert!(note.html.contains("<p><strong>Phone:</strong> </p>"));
        assert_eq!(note.text, "Tom & Jerry's \"quote\"");
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_html("hello world"), "hello world");
        assert_eq!(escape_html(""), "");
    }
}
