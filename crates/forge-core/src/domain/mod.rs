//! Domain entities - the catalog and site content objects.

mod admin;
mod category;
mod certificate;
mod client;
mod contact;
mod exhibition;
mod locale;
mod news;
mod product;
mod solution;
mod subscriber;

pub use admin::AdminUser;
pub use category::Category;
pub use certificate::Certificate;
pub use client::Client;
pub use contact::ContactMessage;
pub use exhibition::Exhibition;
pub use locale::{Locale, LocalizedText};
pub use news::NewsArticle;
pub use product::{Product, ProductSpec};
pub use solution::Solution;
pub use subscriber::NewsletterSubscriber;

use uuid::Uuid;

use crate::error::DomainError;

/// Anything stored by id in a repository.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Slugs are non-empty and made of lower-case ASCII letters, digits and single dashes.
pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    let valid = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidSlug(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(validate_slug("filling-line-3000").is_ok());
        assert!(validate_slug("x").is_ok());
    }

    #[test]
    fn test_invalid_slugs() {
        for slug in ["", "-lead", "trail-", "double--dash", "Upper", "with space", "ünicode"] {
            assert!(validate_slug(slug).is_err(), "{slug} should be rejected");
        }
    }
}
