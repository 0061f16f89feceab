//! Media storage port for admin uploads.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Upload destinations. One per content type that carries images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFolder {
    Categories,
    Products,
    Solutions,
    News,
    Exhibitions,
    Certificates,
    Clients,
}

impl MediaFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaFolder::Categories => "categories",
            MediaFolder::Products => "products",
            MediaFolder::Solutions => "solutions",
            MediaFolder::News => "news",
            MediaFolder::Exhibitions => "exhibitions",
            MediaFolder::Certificates => "certificates",
            MediaFolder::Clients => "clients",
        }
    }
}

impl fmt::Display for MediaFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaFolder {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "categories" => Ok(MediaFolder::Categories),
            "products" => Ok(MediaFolder::Products),
            "solutions" => Ok(MediaFolder::Solutions),
            "news" => Ok(MediaFolder::News),
            "exhibitions" => Ok(MediaFolder::Exhibitions),
            "certificates" => Ok(MediaFolder::Certificates),
            "clients" => Ok(MediaFolder::Clients),
            other => Err(MediaError::UnknownFolder(other.to_string())),
        }
    }
}

/// Accepted content types and the extension files are stored with.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
    ("image/svg+xml", "svg"),
    ("application/pdf", "pdf"),
];

/// File received from the dashboard, not yet stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub folder: MediaFolder,
    pub original_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Check size and type, returning the extension to store the file with.
    pub fn validate(&self, max_bytes: usize) -> Result<&'static str, MediaError> {
        if self.bytes.is_empty() {
            return Err(MediaError::Empty);
        }
        if self.bytes.len() > max_bytes {
            return Err(MediaError::TooLarge {
                size: self.bytes.len(),
                max: max_bytes,
            });
        }

        // Ignore parameters such as "; charset=utf-8".
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        ALLOWED_TYPES
            .iter()
            .find(|(mime, _)| *mime == essence)
            .map(|(_, ext)| *ext)
            .ok_or(MediaError::UnsupportedType(essence))
    }
}

/// A stored file and where the public can fetch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMedia {
    pub url: String,
    pub content_type: String,
    pub size: u64,
}

#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Persist an upload and return its public URL.
    async fn store(&self, file: UploadedFile) -> Result<StoredMedia, MediaError>;

    /// Remove a previously stored file by its public URL.
    async fn delete(&self, url: &str) -> Result<(), MediaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Unknown upload folder: {0}")]
    UnknownFolder(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Empty upload")]
    Empty,

    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("Storage failure: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, len: usize) -> UploadedFile {
        UploadedFile {
            folder: MediaFolder::Products,
            original_name: "press.jpg".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0u8; len],
        }
    }

    #[test]
    fn test_accepts_known_image_types() {
        assert_eq!(file("image/jpeg", 10).validate(100).unwrap(), "jpg");
        assert_eq!(file("image/PNG; foo=bar", 10).validate(100).unwrap(), "png");
        assert_eq!(file("application/pdf", 10).validate(100).unwrap(), "pdf");
    }

    #[test]
    fn test_rejects_bad_uploads() {
        assert!(matches!(
            file("text/html", 10).validate(100),
            Err(MediaError::UnsupportedType(_))
        ));
        assert!(matches!(
            file("image/jpeg", 101).validate(100),
            Err(MediaError::TooLarge { size: 101, max: 100 })
        ));
        assert!(matches!(file("image/jpeg", 0).validate(100), Err(MediaError::Empty)));
    }

    #[test]
    fn test_folder_round_trip() {
        assert_eq!("news".parse::<MediaFolder>().unwrap(), MediaFolder::News);
        assert!("../etc".parse::<MediaFolder>().is_err());
    }
}
