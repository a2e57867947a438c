//! Intake session routes.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use intake::{ChatFailure, SubmitOutcome};
use order_core::{ChatMessage, Field, FieldUpdate, OrderRequest};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Query parameters accepted when opening a session.
#[derive(Deserialize)]
pub struct CreateParams {
    /// Optional product pre-fill; unrecognized values are ignored silently.
    pub product: Option<String>,
}

/// A session snapshot returned by most endpoints.
#[derive(Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub record: OrderRequest,
    pub errors: BTreeMap<Field, String>,
    pub history: Vec<ChatMessage>,
    /// Pre-filled "talk to a human" link offered alongside the form.
    pub whatsapp_inquiry_url: String,
}

/// Request body for a chat turn.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for a chat turn.
#[derive(Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub updated: Vec<Field>,
    pub record: OrderRequest,
}

/// Response body for an accepted submission.
#[derive(Serialize)]
pub struct SubmitResponse {
    pub status: String,
    pub notification_url: String,
}

/// Response body for a submission rejected by validation.
#[derive(Serialize)]
pub struct RejectedResponse {
    pub status: String,
    pub errors: BTreeMap<Field, String>,
}

/// Open a new intake session, honoring the `product` query parameter.
pub async fn create_api(
    State(state): State<AppState>,
    Query(params): Query<CreateParams>,
) -> Result<Json<SessionView>> {
    let id = state.open_session(params.product.as_deref()).await;
    info!(session = %id, "Intake session opened");

    let sessions = state.sessions.lock().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound)?;
    Ok(Json(view(id, session, &state.whatsapp_number)))
}

/// Fetch a session snapshot.
pub async fn get_api(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let sessions = state.sessions.lock().await;
    let session = sessions.get(&id).ok_or(ApiError::SessionNotFound)?;
    Ok(Json(view(id, session, &state.whatsapp_number)))
}

/// Apply a manual field edit.
pub async fn edit_api(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<SessionView>> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound)?;

    session.edit(&update)?;
    Ok(Json(view(id, session, &state.whatsapp_number)))
}

/// Run one chat turn.
///
/// Upstream failures surface as the same status codes the gateway uses
/// (429 rate limit, 402 out of credits, 500 otherwise) with the fallback
/// text in the body, so clients can both toast and render the message.
pub async fn chat_api(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Response> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound)?;

    let turn = session.chat(&request.message).await?;

    let body = ChatResponse {
        message: turn.reply,
        updated: turn.updated,
        record: session.record().clone(),
    };

    let status = match turn.failure {
        None => StatusCode::OK,
        Some(ChatFailure::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
        Some(ChatFailure::QuotaExceeded) => StatusCode::PAYMENT_REQUIRED,
        Some(ChatFailure::Unavailable) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    Ok((status, Json(body)).into_response())
}

/// Attempt to submit the session's record.
pub async fn submit_api(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound)?;

    match session.submit().await? {
        SubmitOutcome::Accepted { notification_url } => {
            info!(session = %id, "Order submitted");
            Ok(Json(SubmitResponse {
                status: "submitted".to_string(),
                notification_url,
            })
            .into_response())
        }
        SubmitOutcome::Rejected(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(RejectedResponse {
                status: "rejected".to_string(),
                errors,
            }),
        )
            .into_response()),
    }
}

fn view(id: Uuid, session: &crate::state::WebSession, whatsapp_number: &str) -> SessionView {
    let record = session.record();
    let product = (!record.product.trim().is_empty()).then_some(record.product.as_str());

    SessionView {
        session_id: id,
        record: record.clone(),
        errors: session.errors().clone(),
        history: session.history().to_vec(),
        whatsapp_inquiry_url: whatsapp::inquiry_link(whatsapp_number, product),
    }
}
