//! Showcase Backend
//!
//! REST backend for a gallery of user-submitted works: image uploads, likes,
//! comments, and admin moderation, persisted in a single JSON document.

mod api;
mod auth;
mod config;
mod errors;
mod media;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use media::{LocalMediaStore, MediaStore};
use store::{WorkDocument, WorkRepository};

/// Uploaded works may carry several images; cap the whole form at 16 MiB.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// URL prefix under which stored images are served back.
const UPLOADS_URL_PREFIX: &str = "/api/uploads";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<WorkRepository>,
    pub media: Arc<dyn MediaStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Showcase Backend");
    tracing::info!("Data path: {:?}", config.data_path);
    tracing::info!("Upload dir: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the admin token was left at its default
    if config.uses_default_admin_token() {
        tracing::warn!(
            "Admin token is the built-in default (SHOWCASE_ADMIN_TOKEN). Do not run this in production!"
        );
    }

    // Initialize the work repository from the JSON document
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let document = WorkDocument::new(config.data_path.clone());
    let repo = Arc::new(WorkRepository::open(document).await);
    tracing::info!("Loaded {} works", repo.list().await.len());

    // Local-disk media store behind the MediaStore seam
    let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(
        config.upload_dir.clone(),
        UPLOADS_URL_PREFIX.to_string(),
    ));

    // Create application state
    let state = AppState {
        repo,
        media,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Works
        .route("/works", get(api::list_works).post(api::create_work))
        .route("/works/{id}", delete(api::delete_work))
        .route("/works/{id}/like", post(api::toggle_like))
        .route("/works/{id}/pin", post(api::toggle_pin))
        // Comments
        .route("/works/{id}/comments", post(api::add_comment))
        .route(
            "/works/{id}/comments/{comment_id}",
            delete(api::delete_comment),
        )
        // Admin
        .route("/admin/login", post(api::admin_login))
        // Health check
        .route("/health", get(health_check))
        // Stored image bytes
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
