use async_trait::async_trait;

use forge_core::ports::{EmailMessage, MailError, Mailer};

/// Writes emails to the log instead of sending them. Used when no mail API is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = ?message.to,
            subject = %message.subject,
            reply_to = ?message.reply_to,
            body = %message.text,
            "Email not sent (no mail API configured)"
        );
        Ok(())
    }
}
