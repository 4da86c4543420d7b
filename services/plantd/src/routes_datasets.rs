use axum::{extract::State, Json};
use datasets::{
    coverage, group_by_plant_type, list_datasets, map_classes_to_datasets, DatasetEntry, DatasetStats,
};
use serde_json::json;

use crate::error::ApiError;
use crate::state::SharedState;

/// Directory scan on the blocking pool. A failed scan is already logged and
/// comes back empty.
async fn scan(state: &SharedState) -> Result<Vec<DatasetEntry>, ApiError> {
    let root = state.config.dataset_root.clone();
    let rules = state.rules.clone();
    tokio::task::spawn_blocking(move || list_datasets(&root, &rules).into_value())
        .await
        .map_err(|e| ApiError::internal(format!("dataset scan task failed: {e}")))
}

pub async fn get_datasets(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    let list = scan(&state).await?;
    Ok(Json(json!({
        "success": true,
        "data": group_by_plant_type(&list),
        "total": list.len(),
    })))
}

pub async fn get_class_datasets(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    let list = scan(&state).await?;
    let mapping = map_classes_to_datasets(&state.catalog, &list);
    let report = coverage(&state.catalog, &mapping);
    Ok(Json(json!({
        "success": true,
        "data": mapping,
        "coverage": report,
    })))
}

pub async fn get_dataset_stats(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    let list = scan(&state).await?;
    Ok(Json(json!({
        "success": true,
        "stats": DatasetStats::from_entries(&list),
    })))
}
