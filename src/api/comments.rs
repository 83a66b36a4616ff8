//! Comment API endpoints.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::auth;
use crate::errors::AppError;
use crate::models::{AddCommentRequest, Comment, DeleteCommentRequest};
use crate::AppState;

/// POST /api/works/:id/comments - Add a comment to a work.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let content = request.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::Validation(
            "Comment content is required".to_string(),
        ));
    }

    let comment = state
        .repo
        .add_comment(&id, content, request.user_id, request.username)
        .await?;
    tracing::info!("Comment {} added to work {}", comment.id, id);

    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/works/:id/comments/:comment_id - Delete a comment.
///
/// Allowed for the comment's author or an admin.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(request): Json<DeleteCommentRequest>,
) -> Result<StatusCode, AppError> {
    let is_admin = auth::is_admin(&headers, &state.config.admin_token);

    state
        .repo
        .remove_comment(&id, &comment_id, &request.user_id, is_admin)
        .await?;
    tracing::info!("Comment {} deleted from work {}", comment_id, id);

    Ok(StatusCode::NO_CONTENT)
}
