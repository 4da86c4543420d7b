use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use heuristics::{HealthStatus, ModelInfo, PredictionResult, TopPrediction};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::ApiError;
use crate::state::SharedState;
use crate::upload::stage_upload;

#[derive(Serialize)]
pub struct PredictionBody {
    pub plant: String,
    pub disease: String,
    pub confidence: f64,
    pub status: HealthStatus,
    pub full_class: String,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub prediction: PredictionBody,
    pub top_predictions: Vec<TopPrediction>,
    pub model_info: ModelInfo,
}

impl PredictResponse {
    pub fn new(res: PredictionResult, model_info: ModelInfo) -> Self {
        Self {
            success: true,
            prediction: PredictionBody {
                plant: res.plant,
                disease: res.disease,
                confidence: res.confidence,
                status: res.status,
                full_class: res.full_class,
            },
            top_predictions: res.top_predictions,
            model_info,
        }
    }
}

pub async fn post_predict(
    State(state): State<SharedState>,
    mp: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let mut mp = mp?;
    let upload = stage_upload(&mut mp, &state.config.upload_dir, state.config.max_upload_bytes).await?;
    info!(file = %upload.original_name, size = upload.size, "prediction request");

    let outcome = state.classifier.classify(&upload.path).await;
    let name = upload.original_name.clone();
    let hash = upload.hash_hex.clone();
    drop(upload);

    let res = outcome.map_err(|e| {
        error!(file = %name, error = %e, "prediction failed");
        ApiError::from(e)
    })?;

    let id = state.record_prediction(&res, &name, &hash).await;
    info!(id, class = %res.full_class, confidence = res.confidence, "prediction done");

    Ok(Json(PredictResponse::new(res, state.classifier.model_info())))
}

pub async fn get_classes(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "classes": state.catalog.to_json(),
        "count": state.catalog.len(),
    }))
}

pub async fn get_model_info(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": state.classifier.model_info(),
    }))
}
