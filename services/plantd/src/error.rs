use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::classifier::ClassifyError;

/// Renders as `{ "success": false, "error": "<message>" }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: error.into() }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "success": false, "error": self.error }))).into_response()
    }
}

impl From<ClassifyError> for ApiError {
    fn from(e: ClassifyError) -> Self {
        use heuristics::PredictError;
        match e {
            ClassifyError::Predict(PredictError::ImageAccess { .. }) => {
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, format!("Failed to preprocess image: {e}"))
            }
            ClassifyError::Predict(PredictError::EmptyCatalog) => {
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "No classes loaded")
            }
            ClassifyError::Task(_) => ApiError::internal("Prediction failed. Please try again."),
        }
    }
}

// Extractor rejections keep their status but use the JSON error shape.

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::new(e.status(), e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::new(e.status(), e.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(e: MultipartRejection) -> Self {
        ApiError::new(e.status(), e.body_text())
    }
}
