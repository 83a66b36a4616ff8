//! Work API endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;

use crate::auth;
use crate::errors::AppError;
use crate::media::allowed_extension;
use crate::models::{LikeRequest, LikeResponse, PinResponse, Work};
use crate::AppState;

/// GET /api/works - List all works, pinned first, then newest first.
pub async fn list_works(State(state): State<AppState>) -> Json<Vec<Work>> {
    let works = state.repo.list().await;
    tracing::debug!("Listing {} works", works.len());
    Json(works)
}

/// POST /api/works - Upload a new work (multipart, one or more images).
pub async fn create_work(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Work>), AppError> {
    let mut title = String::new();
    let mut description = String::new();
    let mut username = String::new();
    let mut real_name = String::new();
    let mut images: Vec<(String, Bytes)> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = field.text().await?.trim().to_string(),
            "description" => description = field.text().await?.trim().to_string(),
            "username" => username = field.text().await?.trim().to_string(),
            "realName" => real_name = field.text().await?.trim().to_string(),
            "images" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                images.push((filename, data));
            }
            _ => {}
        }
    }

    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if username.is_empty() {
        username = "anonymous".to_string();
    }

    // Keep only uploads whose filename carries an allowed image extension.
    let valid_images: Vec<(String, Bytes)> = images
        .into_iter()
        .filter_map(|(filename, data)| allowed_extension(&filename).map(|ext| (ext, data)))
        .collect();
    if valid_images.is_empty() {
        return Err(AppError::Validation(
            "At least one image with an allowed extension is required".to_string(),
        ));
    }

    // Store accepted images under names derived from the work id; the first
    // stored URL becomes the main image.
    let work_id = uuid::Uuid::new_v4().to_string();
    let mut image_urls = Vec::with_capacity(valid_images.len());
    for (index, (ext, data)) in valid_images.into_iter().enumerate() {
        let filename = format!("{}_{}.{}", work_id, index, ext);
        let url = state.media.store(data, &filename).await?;
        image_urls.push(url);
    }

    let work = Work::new(work_id, title, description, username, real_name, image_urls);
    let work = state.repo.insert(work).await;
    tracing::info!("Work {} created with {} images", work.id, work.image_urls.len());

    Ok((StatusCode::CREATED, Json(work)))
}

/// DELETE /api/works/:id - Delete a work and its images (admin only).
pub async fn delete_work(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    auth::require_admin(&headers, &state.config.admin_token)?;

    let removed = state.repo.remove(&id).await?;
    for url in &removed.image_urls {
        // Best effort: a leaked file is preferable to a blocked delete.
        if !state.media.delete(url).await {
            tracing::warn!("Orphaned media file left behind for work {}: {}", id, url);
        }
    }

    tracing::info!("Work {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/works/:id/like - Toggle the caller's like on a work.
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<LikeRequest>,
) -> Result<Json<LikeResponse>, AppError> {
    let response = state.repo.toggle_like(&id, &request.user_id).await?;
    Ok(Json(response))
}

/// POST /api/works/:id/pin - Toggle a work's pin flag (admin only).
pub async fn toggle_pin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<PinResponse>, AppError> {
    auth::require_admin(&headers, &state.config.admin_token)?;

    let is_pinned = state.repo.toggle_pin(&id).await?;
    tracing::info!(
        "Work {} {}",
        id,
        if is_pinned { "pinned" } else { "unpinned" }
    );
    Ok(Json(PinResponse { is_pinned }))
}
