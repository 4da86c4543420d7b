use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::SharedState;

const DEFAULT_RECENT: usize = 10;

#[derive(Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

pub async fn get_stats(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let stats = state.history.read().await.stats(Utc::now());
    Json(json!({ "success": true, "data": stats }))
}

pub async fn get_recent(
    State(state): State<SharedState>,
    q: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(q) = q?;
    let limit = q.limit.filter(|n| *n > 0).unwrap_or(DEFAULT_RECENT);
    let recent = state.history.read().await.recent(limit, Utc::now());
    Ok(Json(json!({ "success": true, "data": recent })))
}
