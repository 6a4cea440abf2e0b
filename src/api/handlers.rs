//! Request handlers.
//!
//! Request bodies are plain text (a CIDR block or an address); surrounding
//! whitespace is trimmed before parsing.

use super::state::SharedRangeSet;
use crate::error::RangeError;
use crate::processing::RangeSnapshot;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ranges: usize,
}

pub async fn health(State(state): State<Arc<SharedRangeSet>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        ranges: state.len().await,
    })
}

/// `GET /ipRanges`
pub async fn list_ranges(State(state): State<Arc<SharedRangeSet>>) -> Json<RangeSnapshot> {
    Json(state.snapshot().await)
}

/// `POST /ipRanges` with a CIDR block as the body.
pub async fn add_range(
    State(state): State<Arc<SharedRangeSet>>,
    body: String,
) -> Result<Json<RangeSnapshot>, RangeError> {
    let snapshot = state.add_cidr(body.trim()).await?;
    Ok(Json(snapshot))
}

/// `DELETE /ipRanges`
pub async fn reset_ranges(State(state): State<Arc<SharedRangeSet>>) -> StatusCode {
    state.reset().await;
    StatusCode::OK
}

/// `POST /isInclude` with a dotted-decimal address as the body.
pub async fn is_include(
    State(state): State<Arc<SharedRangeSet>>,
    body: String,
) -> Result<Json<bool>, RangeError> {
    let included = state.is_included(body.trim()).await?;
    Ok(Json(included))
}
