//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    /// Orders persisted so far, as a cheap liveness probe of the database.
    pub orders: i64,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Result<Json<Health>> {
    let orders = database::order::count_orders(state.db.pool())
        .await
        .map_err(|e| crate::error::ApiError::Internal(e.to_string()))?;

    Ok(Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        orders,
    }))
}
