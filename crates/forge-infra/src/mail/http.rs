//! Transactional email over an HTTP JSON API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use forge_core::ports::{EmailMessage, MailError, Mailer};

/// HTTP mail provider configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Endpoint accepting `POST` of a JSON message.
    pub api_url: String,
    /// Bearer token. Without one the server falls back to [`super::LogMailer`].
    pub api_key: Option<String>,
    pub from: String,
    pub timeout: Duration,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.resend.com/emails".to_string(),
            api_key: None,
            from: "Forge <no-reply@localhost>".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl MailConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("MAIL_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("MAIL_API_KEY").ok().filter(|k| !k.is_empty()),
            from: std::env::var("MAIL_FROM").unwrap_or(defaults.from),
            timeout: defaults.timeout,
        }
    }
}

#[derive(Debug, Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

/// Mailer posting JSON to the configured provider with `reqwest`.
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
    api_key: String,
}

impl HttpMailer {
    /// `None` when no API key is configured.
    pub fn new(config: MailConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Some(Self {
            client,
            config,
            api_key,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        let payload = OutgoingEmail {
            from: &self.config.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
            reply_to: message.reply_to.as_deref(),
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(subject = %message.subject, recipients = message.to.len(), "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        assert!(HttpMailer::new(MailConfig::default()).is_none());
        assert!(
            HttpMailer::new(MailConfig {
                api_key: Some("key".into()),
                ..MailConfig::default()
            })
            .is_some()
        );
    }

    #[test]
    fn test_payload_omits_missing_reply_to() {
        let to = vec!["sales@example.com".to_string()];
        let payload = OutgoingEmail {
            from: "Forge <no-reply@example.com>",
            to: &to,
            subject: "New contact message",
            html: "<p>hi</p>",
            text: "hi",
            reply_to: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["to"][0], "sales@example.com");
        assert!(json.get("reply_to").is_none());
    }
}
