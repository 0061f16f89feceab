//! SeaORM entities. Localized text is stored as one column per locale.

pub mod admin_user;
pub mod category;
pub mod certificate;
pub mod client;
pub mod contact_message;
pub mod exhibition;
pub mod news_article;
pub mod newsletter_subscriber;
pub mod product;
pub mod solution;

use forge_core::domain::Locale;

/// Parse a stored locale code, falling back to the default locale.
pub(crate) fn stored_locale(code: &str) -> Locale {
    code.parse().unwrap_or_else(|_| {
        tracing::warn!(locale = %code, "Unknown locale stored, using default");
        Locale::default()
    })
}
