/// Cover storage service - manages album cover images on disk
use crate::error::{Result, ServerError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Content types accepted for cover uploads
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &[
    "image/apng",
    "image/avif",
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/webp",
];

/// Route prefix under which stored covers are served
pub const COVERS_ROUTE: &str = "/covers";

/// Slack for multipart boundaries and part headers around the image
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// A cover written to disk
#[derive(Debug, Clone)]
pub struct StoredCover {
    pub path: PathBuf,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct CoverStorage {
    base_path: PathBuf,
    public_url: String,
    max_bytes: usize,
}

impl CoverStorage {
    pub fn new(base_path: PathBuf, public_url: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            base_path,
            public_url: public_url.into(),
            max_bytes,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Largest accepted cover, in bytes
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Request body limit for cover uploads, leaving room for multipart framing
    pub fn upload_body_limit(&self) -> usize {
        self.max_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
    }

    /// Initialize storage directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Check the declared content type of an upload
    pub fn validate_content_type(content_type: Option<&str>) -> Result<()> {
        let content_type = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .ok_or_else(|| ServerError::BadRequest("Cover content type is required".to_string()))?;

        if !ACCEPTED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(ServerError::BadRequest(format!(
                "Cover must be one of {}",
                ACCEPTED_IMAGE_TYPES.join(", ")
            )));
        }

        Ok(())
    }

    /// Write an uploaded cover and return where it lives
    pub async fn store(
        &self,
        original_name: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<StoredCover> {
        Self::validate_content_type(content_type)?;

        if data.len() > self.max_bytes {
            return Err(ServerError::PayloadTooLarge(format!(
                "Cover exceeds {} bytes",
                self.max_bytes
            )));
        }

        let filename = format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            sanitize_file_name(original_name.unwrap_or_default())
        );
        let path = self.base_path.join(&filename);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        tracing::debug!("Stored cover at {:?}", path);

        Ok(StoredCover {
            url: format!("{}{}/{}", self.public_url, COVERS_ROUTE, filename),
            path,
        })
    }
}

/// Reduce a client-supplied file name to a safe single path component
fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "cover".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("my cover (1).png"), "my_cover__1_.png");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "cover");
    }

    #[test]
    fn upload_body_limit_tracks_configured_maximum() {
        let storage = CoverStorage::new(PathBuf::from("covers"), "http://localhost", 4 * 1024 * 1024);
        assert_eq!(storage.max_bytes(), 4 * 1024 * 1024);
        assert!(storage.upload_body_limit() > storage.max_bytes());
    }

    #[test]
    fn content_type_parameters_are_ignored() {
        assert!(CoverStorage::validate_content_type(Some("image/png; charset=binary")).is_ok());
        assert!(CoverStorage::validate_content_type(Some("IMAGE/JPEG")).is_ok());
        assert!(CoverStorage::validate_content_type(Some("text/plain")).is_err());
        assert!(CoverStorage::validate_content_type(None).is_err());
    }
}
