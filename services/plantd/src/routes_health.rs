use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::json;

use crate::state::SharedState;

pub async fn get_health(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "message": "Plant Disease Classification API is running",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": state.classifier.name(),
        "classes": state.catalog.len(),
    }))
}
