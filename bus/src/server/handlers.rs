//! HTTP route handlers for the bus server.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::error::ApiError;
use super::metrics::Metrics;
use super::request::{ReadFromParams, ReadSinceParams, SendMessageBody, TopicParams};
use super::response::{LengthResponse, MessagesResponse, SendResponse, TopicsResponse};
use crate::MessageBus;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub bus: Arc<MessageBus>,
    pub metrics: Arc<Metrics>,
}

/// Handle POST /api/v1/bus/send
pub async fn handle_send(
    State(state): State<AppState>,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<SendResponse>, ApiError> {
    let receipt = state.bus.send_message(body.into()).await?;

    state.metrics.messages_appended_total.inc();

    Ok(Json(SendResponse::success(
        receipt.topic,
        receipt.index,
        receipt.timestamp,
    )))
}

/// Handle GET /api/v1/bus/read_from
pub async fn handle_read_from(
    State(state): State<AppState>,
    Query(params): Query<ReadFromParams>,
) -> Result<Json<MessagesResponse>, ApiError> {
    let entries = state.bus.read_from(params.into()).await?;

    state.metrics.messages_read_total.inc_by(entries.len() as u64);

    Ok(Json(MessagesResponse::success(entries)))
}

/// Handle GET /api/v1/bus/read_since
pub async fn handle_read_since(
    State(state): State<AppState>,
    Query(params): Query<ReadSinceParams>,
) -> Result<Json<MessagesResponse>, ApiError> {
    let entries = state.bus.read_since(params.into()).await?;

    state.metrics.messages_read_total.inc_by(entries.len() as u64);

    Ok(Json(MessagesResponse::success(entries)))
}

/// Handle GET /api/v1/bus/length
pub async fn handle_length(
    State(state): State<AppState>,
    Query(params): Query<TopicParams>,
) -> Result<Json<LengthResponse>, ApiError> {
    let length = state.bus.topic_length(params.topic).await?;

    Ok(Json(LengthResponse::success(length.topic, length.length)))
}

/// Handle GET /api/v1/bus/topics
pub async fn handle_topics(
    State(state): State<AppState>,
) -> Result<Json<TopicsResponse>, ApiError> {
    let listing = state.bus.topics().await?;

    Ok(Json(TopicsResponse::success(listing.topics, listing.count)))
}

/// Handle GET /metrics
pub async fn handle_metrics(State(state): State<AppState>) -> String {
    state.metrics.encode()
}

/// Handle GET /-/healthy
pub async fn handle_healthy() -> StatusCode {
    StatusCode::OK
}

/// Handle GET /-/ready
pub async fn handle_ready() -> StatusCode {
    StatusCode::OK
}
