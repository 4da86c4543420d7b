//! Mock admin authentication. Tokens are opaque `jwt_token_<millis>` strings;
//! there is no signing and no session store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

pub const TOKEN_PREFIX: &str = "jwt_token_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Accepts both `{username, password}` and `{credentials: {username, password}}`.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginBody {
    pub credentials: Option<Credentials>,
    #[serde(flatten)]
    pub direct: Credentials,
}

impl LoginBody {
    pub fn into_credentials(self) -> Credentials {
        self.credentials.unwrap_or(self.direct)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Missing,
    Invalid,
    Ok(UserInfo),
}

pub fn admin_user(cfg: &AppConfig) -> UserInfo {
    UserInfo {
        id: 1,
        username: cfg.admin_username.clone(),
        email: "admin@plantdisease.com".to_string(),
        role: "admin".to_string(),
    }
}

pub fn check_login(cfg: &AppConfig, creds: &Credentials) -> AuthOutcome {
    let (Some(user), Some(pass)) = (creds.username.as_deref(), creds.password.as_deref()) else {
        return AuthOutcome::Missing;
    };
    if user.is_empty() || pass.is_empty() {
        return AuthOutcome::Missing;
    }
    if user == cfg.admin_username && pass == cfg.admin_password {
        AuthOutcome::Ok(admin_user(cfg))
    } else {
        AuthOutcome::Invalid
    }
}

pub fn issue_token(now: DateTime<Utc>) -> String {
    format!("{TOKEN_PREFIX}{}", now.timestamp_millis())
}

/// Check an `Authorization` header value.
pub fn verify_bearer(cfg: &AppConfig, header: Option<&str>) -> AuthOutcome {
    let Some(token) = header.and_then(|h| h.strip_prefix("Bearer ")) else {
        return AuthOutcome::Missing;
    };
    if token.len() > TOKEN_PREFIX.len() && token.starts_with(TOKEN_PREFIX) {
        AuthOutcome::Ok(admin_user(cfg))
    } else {
        AuthOutcome::Invalid
    }
}
