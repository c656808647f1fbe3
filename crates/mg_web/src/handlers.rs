use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mg_core::{MemeEvent, MemeRecord, MemeRequest};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use crate::{ApiError, AppState};

pub const DEFAULT_RECENT_LIMIT: usize = 6;
pub const MAX_RECENT_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub action_type: String,
}

/// Body is parsed by hand so malformed JSON is reported like any other
/// failure.
pub async fn generate_meme(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MemeRecord>, ApiError> {
    let request: MemeRequest = serde_json::from_slice(&body)?;
    let record = state.pipeline.generate(&request).await?;
    Ok(Json(record))
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn recent_memes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<MemeRecord>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT).clamp(1, MAX_RECENT_LIMIT);
    let records = state.pipeline.records().recent_records(limit).await?;
    Ok(Json(records))
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::InvalidId(id.to_string()))
}

pub async fn get_meme(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MemeRecord>, ApiError> {
    let meme_id = parse_id(&id)?;
    state
        .pipeline
        .records()
        .get_record(meme_id)
        .await?
        .map(Json)
        .ok_or(ApiError::MemeNotFound(id))
}

pub async fn record_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MemeEvent>, ApiError> {
    let meme_id = parse_id(&id)?;
    let event: EventRequest = serde_json::from_slice(&body)?;
    let action_type = event.action_type.trim();
    if action_type.is_empty() {
        return Err(ApiError::MissingActionType);
    }

    let event = state.pipeline.records().record_event(meme_id, action_type).await?;
    tracing::info!("Recorded {} for meme {}", event.action_type, event.meme_id);
    Ok(Json(event))
}
