use axum::{
    Extension, Form, Json,
    extract::{FromRequest, Request, State},
    http::{HeaderMap, StatusCode, header},
};
use serde_json::{Value, json};
use tracing::{error, info};

use shanny_core::{
    ContactNotification, validate_contact_form,
    model::{ContactForm, NewContactMessage, SubmissionContext},
};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    middleware::ClientIp,
};

/// Contact form body, posted either as JSON or as a plain HTML form.
#[derive(Debug)]
pub struct ContactPayload(pub ContactForm);

impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        if is_form_encoded(req.headers()) {
            let Form(form) =
                Form::<ContactForm>::from_request(req, state).await?;
            return Ok(Self(form));
        }
        let Json(form) = Json::<ContactForm>::from_request(req, state).await?;
        Ok(Self(form))
    }
}

fn is_form_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

/// `POST /api/contact`
///
/// Stores the submission, then hands the owner notification to a background
/// task. Mail failures are logged and never change the response.
pub async fn submit_contact_handler(
    State(state): State<AppState>,
    Extension(client): Extension<ClientIp>,
    headers: HeaderMap,
    ContactPayload(form): ContactPayload,
) -> AppResult<(StatusCode, Json<Value>)> {
    let submission = validate_contact_form(&form)?;

    let context = SubmissionContext {
        ip: client.as_str().to_string(),
        user_agent: header_string(&headers, header::USER_AGENT)
            .unwrap_or_default(),
        source: header_string(&headers, header::REFERER).unwrap_or_else(
            || SubmissionContext::DEFAULT_SOURCE.to_string(),
        ),
    };

    let notification = ContactNotification::for_submission(&submission);
    let stored = state
        .contact_messages
        .insert(NewContactMessage {
            submission,
            context,
        })
        .await?;
    info!(message_id = %stored.id, "contact message stored");

    if state.mailer.is_enabled() {
        let mailer = state.mailer.clone();
        let message_id = stored.id;
        tokio::spawn(async move {
            if let Err(err) = mailer.send(&notification).await {
                error!(%message_id, error = %err, "failed to send contact email");
            }
        });
    }

    Ok((StatusCode::CREATED, Json(json!({ "ok": true }))))
}

fn header_string(
    headers: &HeaderMap,
    name: header::HeaderName,
) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
