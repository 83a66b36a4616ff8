//! Admin API endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::errors::AppError;
use crate::AppState;

/// Request body for the admin login exchange.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// Successful login response carrying the bearer token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// POST /api/admin/login - Exchange the admin password for a bearer token.
///
/// The token is the shared secret itself; there are no sessions.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !auth::constant_time_compare(&request.password, &state.config.admin_token) {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    Ok(Json(LoginResponse {
        success: true,
        token: state.config.admin_token.clone(),
    }))
}
