//! Content generation endpoints
//!
//! Thin translation layer over [`ContentGenerator`]: deserialize the
//! camelCase wire DTOs, hand off to the engine, and shape the responses
//! the way downstream clients expect.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use curator_core::{ContentKind, ConversationMessage};
use curator_engine::GenerateRequest;
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub player_id: String,
    pub item_id: i64,
    /// Free-form kind tag; unrecognized values fall back to generic
    /// generation.
    pub content_type: String,
    #[serde(default)]
    pub specific_request: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub content: String,
    /// Echo of the requested kind tag, verbatim.
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulateObjectRequest {
    pub item_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulateAllResponse {
    pub message: String,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /api/llm/generate-content
pub async fn generate_content(
    State(state): State<AppState>,
    Json(request): Json<GenerateContentRequest>,
) -> ApiResult<Json<GenerateContentResponse>> {
    if request.player_id.trim().is_empty() {
        return Err(ApiError::invalid_input("playerId must not be empty"));
    }

    let kind = ContentKind::from(request.content_type.clone());
    info!(
        player_id = %request.player_id,
        item_id = request.item_id,
        kind = %kind,
        "generate-content request"
    );

    let mut engine_request = GenerateRequest::new(&request.player_id, request.item_id, kind);
    engine_request.specific_request = request.specific_request;
    engine_request.conversation_history = request.conversation_history;

    let generated = state.generator.generate(engine_request).await?;

    Ok(Json(GenerateContentResponse {
        content: generated.content,
        content_type: request.content_type,
    }))
}

/// POST /api/llm/populate-object
pub async fn populate_object(
    State(state): State<AppState>,
    Json(request): Json<PopulateObjectRequest>,
) -> ApiResult<Json<StatusMessage>> {
    info!(item_id = request.item_id, "populate-object request");

    state.generator.populate_item(request.item_id).await?;

    Ok(Json(StatusMessage {
        message: "Object populated successfully".to_string(),
    }))
}

/// POST /api/llm/populate-all-descriptions
pub async fn populate_all_descriptions(
    State(state): State<AppState>,
) -> ApiResult<Json<PopulateAllResponse>> {
    info!("populate-all-descriptions request");

    let report = state.generator.run_backfill(&state.backfill).await?;

    let message = if report.processed == 0 {
        "All catalog items already have generated descriptions!"
    } else {
        "Description generation complete!"
    };

    Ok(Json(PopulateAllResponse {
        message: message.to_string(),
        processed: report.processed,
        successful: report.successful,
        failed: report.failed,
    }))
}

// ============================================================================
// UNIT TESTS
// ============================================================================
