//! In-memory work repository backed by the JSON document.
//!
//! The repository loads the collection once at startup and owns it afterwards.
//! A single mutex serializes every mutate-then-persist sequence, so concurrent
//! requests cannot lose each other's updates. Persistence failures are logged
//! and swallowed: the in-memory state stays authoritative for the process.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::{sort_works, Comment, LikeResponse, Work};

use super::WorkDocument;

/// Repository for all work operations.
pub struct WorkRepository {
    document: WorkDocument,
    works: Mutex<HashMap<String, Work>>,
}

impl WorkRepository {
    /// Load the collection from the document and take ownership of it.
    pub async fn open(document: WorkDocument) -> Self {
        let works = document
            .load()
            .await
            .into_iter()
            .map(|w| (w.id.clone(), w))
            .collect();
        Self {
            document,
            works: Mutex::new(works),
        }
    }

    /// Sorted snapshot of all works.
    pub async fn list(&self) -> Vec<Work> {
        let works = self.works.lock().await;
        let mut all: Vec<Work> = works.values().cloned().collect();
        sort_works(&mut all);
        all
    }

    /// Add a newly created work to the collection.
    pub async fn insert(&self, work: Work) -> Work {
        let mut works = self.works.lock().await;
        works.insert(work.id.clone(), work.clone());
        self.persist(&works).await;
        work
    }

    /// Remove a work, returning it so the caller can release its media.
    pub async fn remove(&self, id: &str) -> Result<Work, AppError> {
        let mut works = self.works.lock().await;
        let removed = works
            .remove(id)
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))?;
        self.persist(&works).await;
        Ok(removed)
    }

    /// Toggle `user_id`'s like on a work and return the new state.
    pub async fn toggle_like(&self, id: &str, user_id: &str) -> Result<LikeResponse, AppError> {
        let mut works = self.works.lock().await;
        let work = works
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))?;

        let liked = if let Some(pos) = work.liked_by.iter().position(|u| u == user_id) {
            work.liked_by.remove(pos);
            false
        } else {
            work.liked_by.push(user_id.to_string());
            true
        };
        // `likes` is derived from the membership set.
        work.likes = work.liked_by.len() as i64;
        let likes = work.likes;

        self.persist(&works).await;
        Ok(LikeResponse { likes, liked })
    }

    /// Append a comment to a work.
    pub async fn add_comment(
        &self,
        id: &str,
        content: String,
        user_id: String,
        username: String,
    ) -> Result<Comment, AppError> {
        let mut works = self.works.lock().await;
        let work = works
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))?;

        let comment = Comment::new(content, user_id, username);
        work.comments.push(comment.clone());

        self.persist(&works).await;
        Ok(comment)
    }

    /// Remove a comment. Only the comment's author or an admin may do so.
    pub async fn remove_comment(
        &self,
        work_id: &str,
        comment_id: &str,
        user_id: &str,
        is_admin: bool,
    ) -> Result<(), AppError> {
        let mut works = self.works.lock().await;
        let work = works
            .get_mut(work_id)
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", work_id)))?;

        let pos = work
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))?;

        if !is_admin && work.comments[pos].user_id != user_id {
            return Err(AppError::Permission(
                "Only the comment author or an admin may delete a comment".to_string(),
            ));
        }
        work.comments.remove(pos);

        self.persist(&works).await;
        Ok(())
    }

    /// Flip a work's pin flag and return the new state.
    pub async fn toggle_pin(&self, id: &str) -> Result<bool, AppError> {
        let mut works = self.works.lock().await;
        let work = works
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Work {} not found", id)))?;

        work.is_pinned = !work.is_pinned;
        let pinned = work.is_pinned;

        self.persist(&works).await;
        Ok(pinned)
    }

    /// Write the full collection back to the document. Fire-and-forget: a
    /// failed write is logged and the request proceeds on in-memory state.
    async fn persist(&self, works: &HashMap<String, Work>) {
        let all: Vec<Work> = works.values().cloned().collect();
        if let Err(e) = self.document.save(&all).await {
            tracing::error!("Failed to persist work collection: {}", e);
        }
    }
}
