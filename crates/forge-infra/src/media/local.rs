//! Uploads written to the local filesystem and served by the reverse proxy.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use forge_core::ports::{MediaError, MediaFolder, MediaStorage, StoredMedia, UploadedFile};

/// Default upload size limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory receiving one sub-directory per [`MediaFolder`].
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is served under.
    pub public_prefix: String,
    pub max_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            public_prefix: "/uploads".to_string(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl MediaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            public_prefix: std::env::var("UPLOAD_PUBLIC_PREFIX")
                .map(|p| p.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_prefix),
            max_bytes: std::env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_bytes),
        }
    }
}

/// Stores files as `<upload_dir>/<folder>/<uuid>.<ext>`.
pub struct LocalMediaStorage {
    config: MediaConfig,
}

impl LocalMediaStorage {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    pub fn max_bytes(&self) -> usize {
        self.config.max_bytes
    }

    /// Map a public URL back to a file under the upload directory.
    fn resolve(&self, url: &str) -> Result<PathBuf, MediaError> {
        let invalid = || MediaError::InvalidPath(url.to_string());

        let relative = url
            .strip_prefix(self.config.public_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(invalid)?;

        let (folder, file_name) = relative.split_once('/').ok_or_else(invalid)?;
        let folder: MediaFolder = folder.parse().map_err(|_| invalid())?;

        let is_plain_name = !file_name.is_empty()
            && !file_name.starts_with('.')
            && file_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        if !is_plain_name {
            return Err(invalid());
        }

        Ok(self.folder_path(folder).join(file_name))
    }

    fn folder_path(&self, folder: MediaFolder) -> PathBuf {
        self.config.upload_dir.join(folder.as_str())
    }
}

async fn ensure_dir(path: &Path) -> Result<(), MediaError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| MediaError::Io(e.to_string()))
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn store(&self, file: UploadedFile) -> Result<StoredMedia, MediaError> {
        let extension = file.validate(self.config.max_bytes)?;

        let dir = self.folder_path(file.folder);
        ensure_dir(&dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let size = file.bytes.len() as u64;
        tokio::fs::write(dir.join(&file_name), &file.bytes)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;

        tracing::info!(
            folder = %file.folder,
            original_name = %file.original_name,
            stored_as = %file_name,
            size,
            "Upload stored"
        );

        Ok(StoredMedia {
            url: format!("{}/{}/{}", self.config.public_prefix, file.folder, file_name),
            content_type: file.content_type,
            size,
        })
    }

    async fn delete(&self, url: &str) -> Result<(), MediaError> {
        let path = self.resolve(url)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (LocalMediaStorage, PathBuf) {
        let dir = std::env::temp_dir().join(format!("forge-media-{}", Uuid::new_v4()));
        let storage = LocalMediaStorage::new(MediaConfig {
            upload_dir: dir.clone(),
            public_prefix: "/uploads".to_string(),
            max_bytes: 1024,
        });
        (storage, dir)
    }

    fn png(bytes: usize) -> UploadedFile {
        UploadedFile {
            folder: MediaFolder::Products,
            original_name: "press.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![7u8; bytes],
        }
    }

    #[tokio::test]
    async fn test_store_and_delete() {
        let (storage, dir) = storage();

        let stored = storage.store(png(16)).await.unwrap();
        assert!(stored.url.starts_with("/uploads/products/"));
        assert!(stored.url.ends_with(".png"));
        assert_eq!(stored.size, 16);

        let path = storage.resolve(&stored.url).unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap().len(), 16);

        storage.delete(&stored.url).await.unwrap();
        assert!(!path.exists());
        // Deleting twice is fine.
        storage.delete(&stored.url).await.unwrap();

        let _ = tokio::fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn test_rejects_oversize_upload() {
        let (storage, _dir) = storage();
        assert!(matches!(
            storage.store(png(2048)).await,
            Err(MediaError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let (storage, _dir) = storage();
        assert!(storage.resolve("/uploads/products/../../etc/passwd").is_err());
        assert!(storage.resolve("/uploads/secrets/a.png").is_err());
        assert!(storage.resolve("/elsewhere/products/a.png").is_err());
        assert!(storage.resolve("/uploads/products/.hidden").is_err());
        assert!(storage.resolve("/uploads/news/abc-1.jpg").is_ok());
    }
}
