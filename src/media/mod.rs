//! Media storage: raw image bytes, decoupled from the work records.
//!
//! One capability interface with a local-disk implementation. A remote object
//! store would slot in behind the same trait.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::errors::AppError;

/// Extensions accepted for uploaded images, matched case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Lowercased extension of a client-supplied filename, if it is on the
/// allow-list.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Media storage contract: persist bytes under a name, hand back a URL.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Save the payload under `filename` and return its public URL path.
    async fn store(&self, data: Bytes, filename: &str) -> Result<String, AppError>;

    /// Best-effort removal of the bytes behind a previously returned URL.
    /// Never fails the caller; returns whether the bytes were removed.
    async fn delete(&self, url: &str) -> bool;
}

/// Local filesystem implementation of `MediaStore`.
pub struct LocalMediaStore {
    /// Root directory for all uploads (e.g. "./data/uploads")
    root: PathBuf,
    /// Public URL prefix the HTTP layer serves the root under
    url_prefix: String,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        Self { root, url_prefix }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, data: Bytes, filename: &str) -> Result<String, AppError> {
        fs::create_dir_all(&self.root).await?;
        let path = self.root.join(filename);
        fs::write(&path, &data).await?;
        tracing::debug!("Stored {} byte upload at {:?}", data.len(), path);
        Ok(format!("{}/{}", self.url_prefix, filename))
    }

    async fn delete(&self, url: &str) -> bool {
        // Only the final path segment is trusted; URLs are caller-controlled.
        let Some(filename) = url.rsplit('/').next().filter(|s| !s.is_empty()) else {
            tracing::warn!("Cannot derive filename from media URL {:?}", url);
            return false;
        };
        let path = self.root.join(filename);
        match fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to delete media file {:?}: {}", path, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_allowed_extension() {
        assert_eq!(allowed_extension("photo.png"), Some("png".to_string()));
        assert_eq!(allowed_extension("PHOTO.JPG"), Some("jpg".to_string()));
        assert_eq!(allowed_extension("archive.tar.webp"), Some("webp".to_string()));
        assert_eq!(allowed_extension("script.exe"), None);
        assert_eq!(allowed_extension("no-extension"), None);
        assert_eq!(allowed_extension(""), None);
    }

    #[tokio::test]
    async fn test_store_and_delete_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = LocalMediaStore::new(dir.path().to_path_buf(), "/api/uploads".to_string());

        let url = store
            .store(Bytes::from_static(b"fake png bytes"), "abc_0.png")
            .await
            .unwrap();
        assert_eq!(url, "/api/uploads/abc_0.png");
        assert_eq!(
            tokio::fs::read(dir.path().join("abc_0.png")).await.unwrap(),
            b"fake png bytes"
        );

        assert!(store.delete(&url).await);
        assert!(!dir.path().join("abc_0.png").exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_reports_failure() {
        let dir = TempDir::new().unwrap();
        let store = LocalMediaStore::new(dir.path().to_path_buf(), "/api/uploads".to_string());
        assert!(!store.delete("/api/uploads/never-stored.png").await);
    }

    #[tokio::test]
    async fn test_delete_ignores_path_traversal() {
        let dir = TempDir::new().unwrap();
        let outside = dir.path().join("outside.txt");
        tokio::fs::write(&outside, b"keep me").await.unwrap();

        let root = dir.path().join("uploads");
        tokio::fs::create_dir_all(&root).await.unwrap();
        let store = LocalMediaStore::new(root, "/api/uploads".to_string());

        store.delete("/api/uploads/../outside.txt").await;
        assert!(outside.exists());
    }
}
