pub mod config;
pub mod state;
pub mod error;
pub mod auth;
pub mod classifier;
pub mod history;
pub mod upload;
pub mod routes_auth;
pub mod routes_dashboard;
pub mod routes_datasets;
pub mod routes_health;
pub mod routes_predict;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::AppConfig;
use crate::state::SharedState;

/// Multipart framing on top of the file itself.
const FORM_OVERHEAD: usize = 64 * 1024;

pub fn router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config);
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD;

    Router::new()
        .route("/health", get(routes_health::get_health))
        .route("/api/auth/login", post(routes_auth::post_login))
        .route("/api/auth/verify", get(routes_auth::get_verify))
        .route("/api/predict", post(routes_predict::post_predict))
        .route("/api/predict/classes", get(routes_predict::get_classes))
        .route("/api/predict/model-info", get(routes_predict::get_model_info))
        .route("/api/datasets", get(routes_datasets::get_datasets))
        .route("/api/datasets/classes", get(routes_datasets::get_class_datasets))
        .route("/api/datasets/stats", get(routes_datasets::get_dataset_stats))
        .route("/api/dashboard/stats", get(routes_dashboard::get_stats))
        .route("/api/dashboard/recent-predictions", get(routes_dashboard::get_recent))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    if cfg.cors_permissive() {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = cfg
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
}
