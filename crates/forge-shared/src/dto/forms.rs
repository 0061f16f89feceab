//! Public form submissions.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 150))]
    pub company: Option<String>,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub message: String,
    /// Language the visitor used the site in; defaults to English.
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub id: String,
    pub received_at: String,
}

/// Body of `POST /api/newsletter`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsletterRequest {
    #[validate(email, length(max = 254))]
    pub email: String,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterReceipt {
    pub email: String,
    pub already_subscribed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactRequest {
        ContactRequest {
            name: "Leyla".to_string(),
            email: "leyla@example.com".to_string(),
            phone: None,
            company: Some("Anatolia Foods".to_string()),
            subject: None,
            message: "Please send a quote for the filling line.".to_string(),
            locale: Some("tr".to_string()),
        }
    }

    #[test]
    fn test_valid_contact_request() {
        assert!(contact().validate().is_ok());
    }

    #[test]
    fn test_contact_rejects_bad_email_and_short_message() {
        let mut req = contact();
        req.email = "not-an-email".to_string();
        req.message = "hi".to_string();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("message"));
    }

    #[test]
    fn test_newsletter_requires_email() {
        let req = NewsletterRequest {
            email: "nope".to_string(),
            locale: None,
        };
        assert!(req.validate().is_err());
    }
}
