//! Route handlers for the order intake API.

pub mod catalog;
pub mod health;
pub mod sessions;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Catalog and option lists
        .route("/api/catalog", get(catalog::catalog_api))
        // Intake sessions
        .route("/api/sessions", post(sessions::create_api))
        .route("/api/sessions/:id", get(sessions::get_api))
        .route("/api/sessions/:id", patch(sessions::edit_api))
        .route("/api/sessions/:id/chat", post(sessions::chat_api))
        .route("/api/sessions/:id/submit", post(sessions::submit_api))
}
