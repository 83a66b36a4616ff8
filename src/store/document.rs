//! JSON document adapter: reads and writes the full work collection.

use std::path::PathBuf;

use tokio::fs;

use crate::errors::AppError;
use crate::models::{sort_works, Work};

/// The on-disk JSON document holding every work.
#[derive(Debug, Clone)]
pub struct WorkDocument {
    path: PathBuf,
}

impl WorkDocument {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the full collection. A missing file is an empty collection; an
    /// unreadable or corrupt document is logged and also treated as empty.
    pub async fn load(&self) -> Vec<Work> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read work document {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Work>>(&data) {
            Ok(works) => works,
            Err(e) => {
                tracing::error!("Corrupt work document {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the document with the full collection, sorted for listing.
    pub async fn save(&self, works: &[Work]) -> Result<(), AppError> {
        let mut sorted: Vec<Work> = works.to_vec();
        sort_works(&mut sorted);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let json = serde_json::to_vec_pretty(&sorted)?;
        fs::write(&self.path, json).await?;
        tracing::debug!("Saved {} works to {:?}", sorted.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn work(title: &str, pinned: bool, ts: i64) -> Work {
        let mut w = Work::new(
            uuid::Uuid::new_v4().to_string(),
            title.to_string(),
            String::new(),
            "anonymous".to_string(),
            String::new(),
            vec![format!("/api/uploads/{}.png", title)],
        );
        w.is_pinned = pinned;
        w.created_at = Utc.timestamp_opt(ts, 0).unwrap();
        w
    }

    #[tokio::test]
    async fn test_missing_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let doc = WorkDocument::new(dir.path().join("works.json"));
        assert!(doc.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("works.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let doc = WorkDocument::new(path);
        assert!(doc.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_fields() {
        let dir = TempDir::new().unwrap();
        let doc = WorkDocument::new(dir.path().join("works.json"));

        let original = work("alpha", false, 100);
        doc.save(&[original.clone()]).await.unwrap();

        let loaded = doc.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, original.id);
        assert_eq!(loaded[0].title, "alpha");
        assert_eq!(loaded[0].image_urls, original.image_urls);
        assert_eq!(loaded[0].main_image_url, original.main_image_url);
        assert_eq!(loaded[0].created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_legacy_document_backfills_pin_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("works.json");

        // A document written before pinning existed.
        let legacy = serde_json::json!([{
            "id": "legacy-1",
            "title": "old work",
            "image_urls": ["/api/uploads/legacy-1_0.png"],
            "main_image_url": "/api/uploads/legacy-1_0.png",
            "likes": 0,
            "created_at": "2023-01-01T00:00:00Z"
        }]);
        tokio::fs::write(&path, serde_json::to_vec(&legacy).unwrap())
            .await
            .unwrap();

        let doc = WorkDocument::new(path);
        let loaded = doc.load().await;
        assert_eq!(loaded.len(), 1);
        assert!(!loaded[0].is_pinned);
        assert!(loaded[0].liked_by.is_empty());
        assert!(loaded[0].comments.is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_sorted_order() {
        let dir = TempDir::new().unwrap();
        let doc = WorkDocument::new(dir.path().join("works.json"));

        let older_pinned = work("older-pinned", true, 100);
        let newest = work("newest", false, 300);
        let middle = work("middle", false, 200);
        doc.save(&[newest.clone(), older_pinned.clone(), middle.clone()])
            .await
            .unwrap();

        let loaded = doc.load().await;
        let titles: Vec<&str> = loaded.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["older-pinned", "newest", "middle"]);
    }
}
