//! Comment model: belongs to exactly one work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a work. `user_id` is client-supplied and is the only
/// credential checked for self-deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub user_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(content: String, user_id: String, username: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            user_id,
            username,
            created_at: Utc::now(),
        }
    }
}

/// Request body for adding a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
    #[serde(default = "super::anonymous_user")]
    pub user_id: String,
    #[serde(default = "super::anonymous_user")]
    pub username: String,
}

/// Request body for deleting a comment (identifies the requesting user).
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCommentRequest {
    #[serde(default = "super::anonymous_user")]
    pub user_id: String,
}
