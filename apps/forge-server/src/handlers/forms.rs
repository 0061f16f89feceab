//! Contact form and newsletter sign-up.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::de::DeserializeOwned;
use validator::Validate;

use forge_core::domain::{ContactMessage, Locale, NewsletterSubscriber};
use forge_core::error::RepoError;
use forge_core::ports::{EmailMessage, RateLimitPolicy};
use forge_core::rate_limit::{CONTACT_ACTION, NEWSLETTER_ACTION, rate_limit_key};
use forge_shared::dto::{ContactReceipt, ContactRequest, NewsletterReceipt, NewsletterRequest};
use forge_shared::{ApiResponse, TooManyRequestsBody};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::rate_limit::forwarded_client;
use crate::observability::RequestId;
use crate::state::AppState;

/// Count the request against `action` and build the 429 response when over the limit.
///
/// Store failures let the request through.
async fn enforce_rate_limit(
    state: &AppState,
    action: &str,
    policy: &RateLimitPolicy,
    ip: &str,
) -> Option<HttpResponse> {
    let key = rate_limit_key(action, ip);
    match state.rate_limiter.check(&key, policy).await {
        Ok(result) if result.allowed => None,
        Ok(result) => {
            let retry_after = result.retry_after_secs(state.clock.now_ms());
            tracing::warn!(%action, client = %ip, retry_after, "Rate limit exceeded");
            Some(
                HttpResponse::TooManyRequests()
                    .insert_header(("Retry-After", retry_after.to_string()))
                    .json(TooManyRequestsBody::default()),
            )
        }
        Err(e) => {
            tracing::error!(%action, error = %e, "Rate limiter error, failing open");
            None
        }
    }
}

/// Forms are decoded only after the limiter has counted the request, so
/// unparseable bodies spend budget like any other submission.
fn decode_form<T: DeserializeOwned>(raw: &[u8]) -> AppResult<T> {
    serde_json::from_slice(raw).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}

fn parse_locale(code: Option<&str>) -> Locale {
    code.and_then(|c| c.parse().ok()).unwrap_or_default()
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn notification(message: &ContactMessage, to: String) -> EmailMessage {
    let subject = match &message.subject {
        Some(subject) => format!("New inquiry from {}: {}", message.name, subject),
        None => format!("New inquiry from {}", message.name),
    };

    let mut text = format!("Name: {}\nEmail: {}\n", message.name, message.email);
    if let Some(phone) = &message.phone {
        text.push_str(&format!("Phone: {phone}\n"));
    }
    if let Some(company) = &message.company {
        text.push_str(&format!("Company: {company}\n"));
    }
    text.push_str(&format!("Language: {}\n\n{}", message.locale, message.message));

    let html = format!("<pre>{}</pre>", escape_html(&text));

    EmailMessage {
        to: vec![to],
        subject,
        html,
        text,
        reply_to: Some(message.email.clone()),
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// POST /api/contact
pub async fn submit_contact(
    state: web::Data<AppState>,
    req: HttpRequest,
    request_id: RequestId,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let ip = forwarded_client(req.headers());
    if let Some(denied) =
        enforce_rate_limit(&state, CONTACT_ACTION, &state.rate_limits.contact, &ip).await
    {
        return Ok(denied);
    }

    let body: ContactRequest = decode_form(&body)?;
    body.validate()?;

    let mut message = ContactMessage::new(
        body.name.trim().to_string(),
        body.email.trim().to_lowercase(),
        body.message.trim().to_string(),
        parse_locale(body.locale.as_deref()),
        ip,
    );
    message.phone = trimmed(body.phone);
    message.company = trimmed(body.company);
    message.subject = trimmed(body.subject);

    let saved = state.repos.messages.save(message).await?;
    tracing::info!(message_id = %saved.id, request_id = %request_id.as_str(), "Contact message stored");

    match &state.contact_notify_email {
        Some(to) => {
            if let Err(e) = state.mailer.send(notification(&saved, to.clone())).await {
                tracing::warn!(message_id = %saved.id, error = %e, "Contact notification not delivered");
            }
        }
        None => tracing::debug!("CONTACT_NOTIFY_EMAIL not set, skipping notification"),
    }

    Ok(HttpResponse::Created().json(ApiResponse::ok(ContactReceipt {
        id: saved.id.to_string(),
        received_at: saved.created_at.to_rfc3339(),
    })))
}

/// POST /api/newsletter
///
/// Subscribing twice is not an error: the second call answers 200 instead of 201.
pub async fn subscribe_newsletter(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let ip = forwarded_client(req.headers());
    if let Some(denied) =
        enforce_rate_limit(&state, NEWSLETTER_ACTION, &state.rate_limits.newsletter, &ip).await
    {
        return Ok(denied);
    }

    let body: NewsletterRequest = decode_form(&body)?;
    body.validate()?;

    let email = body.email.trim().to_lowercase();
    let existing = ApiResponse::ok(NewsletterReceipt {
        email: email.clone(),
        already_subscribed: true,
    });

    if state.repos.subscribers.find_by_email(&email).await?.is_some() {
        return Ok(HttpResponse::Ok().json(existing));
    }

    let subscriber = NewsletterSubscriber::new(&email, parse_locale(body.locale.as_deref()));
    match state.repos.subscribers.save(subscriber).await {
        Ok(saved) => {
            tracing::info!(subscriber_id = %saved.id, "Newsletter subscription added");
            Ok(HttpResponse::Created().json(ApiResponse::ok(NewsletterReceipt {
                email: saved.email,
                already_subscribed: false,
            })))
        }
        // Lost a race against a concurrent sign-up with the same address.
        Err(RepoError::Constraint(_)) => Ok(HttpResponse::Ok().json(existing)),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_lists_contact_details() {
        let mut message = ContactMessage::new(
            "Leyla".to_string(),
            "leyla@example.com".to_string(),
            "Quote for <b>two</b> presses".to_string(),
            Locale::Tr,
            "203.0.113.7".to_string(),
        );
        message.company = Some("Anatolia Foods".to_string());

        let email = notification(&message, "sales@example.com".to_string());
        assert_eq!(email.to, vec!["sales@example.com".to_string()]);
        assert_eq!(email.subject, "New inquiry from Leyla");
        assert_eq!(email.reply_to.as_deref(), Some("leyla@example.com"));
        assert!(email.text.contains("Company: Anatolia Foods"));
        assert!(email.text.contains("Language: tr"));
        assert!(email.html.contains("&lt;b&gt;two&lt;/b&gt;"));
    }

    #[test]
    fn test_unknown_locale_defaults_to_english() {
        assert_eq!(parse_locale(Some("ar")), Locale::Ar);
        assert_eq!(parse_locale(Some("de")), Locale::En);
        assert_eq!(parse_locale(None), Locale::En);
    }
}
