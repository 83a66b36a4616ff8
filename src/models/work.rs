//! Work model: a user-submitted gallery item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Comment;

/// A submitted work with one or more images, likes, and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Work {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Ordered image URLs; the first one is the main image.
    pub image_urls: Vec<String>,
    pub main_image_url: String,
    /// Derived: always equals `liked_by.len()`.
    pub likes: i64,
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub username: String,
    #[serde(default, rename = "realName")]
    pub real_name: String,
    /// Documents written before pinning existed lack this field; default false.
    #[serde(default)]
    pub is_pinned: bool,
}

impl Work {
    /// Build a freshly submitted work around its stored image URLs. The id is
    /// assigned by the caller because stored image filenames embed it.
    pub fn new(
        id: String,
        title: String,
        description: String,
        username: String,
        real_name: String,
        image_urls: Vec<String>,
    ) -> Self {
        let main_image_url = image_urls
            .first()
            .cloned()
            .unwrap_or_default();
        Self {
            id,
            title,
            description,
            image_urls,
            main_image_url,
            likes: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
            username,
            real_name,
            is_pinned: false,
        }
    }
}

/// Sort works for listing and persistence: pinned first, then newest first,
/// id as the final tie-breaker.
pub fn sort_works(works: &mut [Work]) {
    works.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Request body for toggling a like.
#[derive(Debug, Clone, Deserialize)]
pub struct LikeRequest {
    #[serde(default = "super::anonymous_user")]
    pub user_id: String,
}

/// Response body for a like toggle.
#[derive(Debug, Clone, Serialize)]
pub struct LikeResponse {
    pub likes: i64,
    pub liked: bool,
}

/// Response body for a pin toggle.
#[derive(Debug, Clone, Serialize)]
pub struct PinResponse {
    pub is_pinned: bool,
}
