use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::AUTHORIZATION,
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::{check_login, issue_token, verify_bearer, AuthOutcome, LoginBody};
use crate::error::ApiError;
use crate::state::SharedState;

pub async fn post_login(
    State(state): State<SharedState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(body) = body?;
    let creds = body.into_credentials();
    match check_login(&state.config, &creds) {
        AuthOutcome::Ok(user) => {
            info!(user = %user.username, "login ok");
            Ok(Json(json!({
                "success": true,
                "message": "Login successful",
                "token": issue_token(Utc::now()),
                "user": user,
            })))
        }
        AuthOutcome::Missing => Err(ApiError::bad_request("Username and password are required")),
        AuthOutcome::Invalid => {
            warn!(user = ?creds.username, "invalid credentials");
            Err(ApiError::unauthorized("Invalid credentials"))
        }
    }
}

pub async fn get_verify(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    match verify_bearer(&state.config, header) {
        AuthOutcome::Ok(user) => Ok(Json(json!({ "success": true, "user": user }))),
        AuthOutcome::Missing => Err(ApiError::unauthorized("No token provided")),
        AuthOutcome::Invalid => Err(ApiError::unauthorized("Invalid token")),
    }
}
