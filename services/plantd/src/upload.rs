use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use uuid::Uuid;

use crate::error::ApiError;

pub const IMAGE_FIELD: &str = "image";
const ALLOWED: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// An upload written to disk for the duration of one request.
///
/// The file is deleted when this value is dropped, including when the
/// request future is cancelled mid-classification.
#[derive(Debug)]
pub struct StagedUpload {
    pub path: PathBuf,
    pub original_name: String,
    pub size: usize,
    pub hash_hex: String, // BLAKE3(file bytes)
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to delete uploaded file");
            }
        }
    }
}

/// Basename only, with anything outside `[A-Za-z0-9._-]` replaced by `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    let clean: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    if clean.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        clean
    }
}

/// Both the extension and the declared content type must name an image format.
pub fn is_allowed_image(file_name: &str, content_type: Option<&str>) -> bool {
    let ext_ok = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false);
    let mime = content_type.unwrap_or("").to_lowercase();
    let mime_ok = ALLOWED.iter().any(|a| mime.contains(a));
    ext_ok && mime_ok
}

/// Pull the `image` field out of the form and stage it under `dir` as
/// `<uuid>-<sanitised original name>`, so filename keywords survive.
pub async fn stage_upload(mp: &mut Multipart, dir: &Path, max_bytes: usize) -> Result<StagedUpload, ApiError> {
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let original_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("No image file provided"))?;
        if !is_allowed_image(&original_name, field.content_type()) {
            return Err(ApiError::bad_request(
                "Invalid file type. Only JPEG, JPG, PNG, GIF, and WebP images are allowed.",
            ));
        }

        let bytes: bytes::Bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        if bytes.len() > max_bytes {
            return Err(ApiError::bad_request(format!(
                "File too large. Maximum size is {} bytes.",
                max_bytes
            )));
        }
        if bytes.is_empty() {
            return Err(ApiError::bad_request("Uploaded file is empty"));
        }

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?;
        // guard first, so a failed write does not leave a partial file
        let staged = StagedUpload {
            path: dir.join(format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&original_name))),
            original_name,
            size: bytes.len(),
            hash_hex: hex::encode(blake3::hash(&bytes).as_bytes()),
        };
        tokio::fs::write(&staged.path, &bytes)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?;

        return Ok(staged);
    }

    Err(ApiError::bad_request("No image file provided"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_file_name("../../etc/tomato leaf.jpg"), "tomato_leaf.jpg");
        assert_eq!(sanitize_file_name("Corn_(maize).PNG"), "Corn__maize_.PNG");
        assert_eq!(sanitize_file_name(".."), "upload");
    }

    #[test]
    fn test_staged_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corn.jpg");
        std::fs::write(&path, b"x").unwrap();

        let staged = StagedUpload {
            path: path.clone(),
            original_name: "corn.jpg".into(),
            size: 1,
            hash_hex: String::new(),
        };
        drop(staged);
        assert!(!path.exists());

        // never written: dropping is quiet
        drop(StagedUpload {
            path: dir.path().join("missing.jpg"),
            original_name: "missing.jpg".into(),
            size: 0,
            hash_hex: String::new(),
        });
    }

    #[test]
    fn test_allowed_image() {
        assert!(is_allowed_image("a.JPG", Some("image/jpeg")));
        assert!(is_allowed_image("a.webp", Some("image/webp")));
        assert!(!is_allowed_image("a.txt", Some("text/plain")));
        assert!(!is_allowed_image("a.jpg", Some("application/octet-stream")));
        assert!(!is_allowed_image("a.jpg", None));
        assert!(!is_allowed_image("jpeg", Some("image/jpeg")));
    }
}
