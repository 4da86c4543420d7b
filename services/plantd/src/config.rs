use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,

    pub catalog_path: Option<PathBuf>, // None => built-in table
    pub dataset_root: PathBuf,

    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub preprocess_images: bool,

    pub cors_origins: Vec<String>, // ["*"] => permissive
    pub admin_username: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let bind_addr = or("PLANTD_BIND_ADDR", "0.0.0.0:3001");
        let catalog_path = get("CATALOG_PATH").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        let dataset_root = PathBuf::from(or("DATASET_ROOT", "Dataset tanaman"));
        let upload_dir = PathBuf::from(or("UPLOAD_DIR", "uploads"));

        let max_upload_bytes: usize = or("MAX_UPLOAD_BYTES", "10485760")
            .trim()
            .parse()
            .context("MAX_UPLOAD_BYTES must be a positive integer")?;

        let preprocess_images = get("PREPROCESS_IMAGES")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
            .unwrap_or(true);

        let cors_origins: Vec<String> = or(
            "CORS_ORIGINS",
            "http://localhost:3000,http://localhost:3002,http://localhost:3003",
        )
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

        let admin_username = or("ADMIN_USERNAME", "admin");
        let admin_password = or("ADMIN_PASSWORD", "admin123");

        // fail fast on nonsense
        bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("PLANTD_BIND_ADDR is not a socket address: {bind_addr}"))?;
        if max_upload_bytes == 0 {
            bail!("MAX_UPLOAD_BYTES must be a positive integer");
        }
        for origin in cors_origins.iter().filter(|o| o.as_str() != "*") {
            HeaderValue::from_str(origin).with_context(|| format!("bad CORS origin: {origin}"))?;
        }

        Ok(Self {
            bind_addr,
            catalog_path,
            dataset_root,
            upload_dir,
            max_upload_bytes,
            preprocess_images,
            cors_origins,
            admin_username,
            admin_password,
        })
    }

    pub fn cors_permissive(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = cfg(&[]).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:3001");
        assert_eq!(c.catalog_path, None);
        assert_eq!(c.max_upload_bytes, 10 * 1024 * 1024);
        assert!(c.preprocess_images);
        assert_eq!(c.cors_origins.len(), 3);
        assert!(!c.cors_permissive());
        assert_eq!(c.admin_username, "admin");
    }

    #[test]
    fn test_overrides() {
        let c = cfg(&[
            ("CATALOG_PATH", "model/classes.json"),
            ("PREPROCESS_IMAGES", "no"),
            ("CORS_ORIGINS", "*"),
            ("MAX_UPLOAD_BYTES", "2048"),
        ])
        .unwrap();
        assert_eq!(c.catalog_path, Some(PathBuf::from("model/classes.json")));
        assert!(!c.preprocess_images);
        assert!(c.cors_permissive());
        assert_eq!(c.max_upload_bytes, 2048);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(cfg(&[("PLANTD_BIND_ADDR", "localhost")]).is_err());
        assert!(cfg(&[("MAX_UPLOAD_BYTES", "0")]).is_err());
        assert!(cfg(&[("MAX_UPLOAD_BYTES", "ten")]).is_err());
    }
}
