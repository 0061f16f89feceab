use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ar,
    #[default]
    En,
    Tr,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Ar, Locale::En, Locale::Tr];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
            Locale::Tr => "tr",
        }
    }

    /// Arabic is laid out right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Locale::Ar),
            "en" => Ok(Locale::En),
            "tr" => Ok(Locale::Tr),
            other => Err(DomainError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// A piece of text translated into every [`Locale`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub ar: String,
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub tr: String,
}

impl LocalizedText {
    pub fn new(ar: impl Into<String>, en: impl Into<String>, tr: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            en: en.into(),
            tr: tr.into(),
        }
    }

    /// Text for `locale`, falling back to English when the translation is missing.
    pub fn get(&self, locale: Locale) -> &str {
        let value = match locale {
            Locale::Ar => &self.ar,
            Locale::En => &self.en,
            Locale::Tr => &self.tr,
        };
        if value.trim().is_empty() {
            &self.en
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("ar".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!(" TR ".parse::<Locale>().unwrap(), Locale::Tr);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_only_arabic_is_rtl() {
        assert!(Locale::Ar.is_rtl());
        assert!(!Locale::En.is_rtl());
        assert!(!Locale::Tr.is_rtl());
    }

    #[test]
    fn test_missing_translation_falls_back_to_english() {
        let text = LocalizedText::new("", "Filling machine", "Dolum makinesi");
        assert_eq!(text.get(Locale::Ar), "Filling machine");
        assert_eq!(text.get(Locale::Tr), "Dolum makinesi");
    }
}
