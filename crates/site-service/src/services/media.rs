//! Uploaded images, stored under date-partitioned directories

use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};

/// Extensions accepted for uploads
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// URL prefix media is served under
pub const MEDIA_URL: &str = "/media/";

const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Where an upload landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    /// Relative to the media root; this is what entities store
    pub path: String,
    pub url: String,
}

/// Public URL for a stored relative path; absolute URLs pass through
pub fn media_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("{MEDIA_URL}{path}")
    }
}

#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl Default for MediaStorage {
    fn default() -> Self {
        Self::new("media", DEFAULT_MAX_BYTES)
    }
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` as `{entity}/{YYYY}/{MM}/{uuid}.{ext}`
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(
        &self,
        entity: &str,
        filename: &str,
        bytes: &[u8],
    ) -> ServiceResult<StoredFile> {
        if entity.is_empty()
            || !entity
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ServiceError::validation(format!(
                "Unknown upload target: {entity}"
            )));
        }
        if bytes.is_empty() {
            return Err(ServiceError::field("file", "Файл пуст"));
        }
        if bytes.len() > self.max_bytes {
            return Err(ServiceError::field(
                "file",
                format!(
                    "Файл больше {} МБ",
                    self.max_bytes / (1024 * 1024)
                ),
            ));
        }

        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| ServiceError::field("file", "Недопустимый формат изображения"))?;

        let now = Utc::now();
        let dir = format!("{entity}/{:04}/{:02}", now.year(), now.month());
        let path = format!("{dir}/{}.{ext}", Uuid::new_v4());

        tokio::fs::create_dir_all(self.root.join(&dir))
            .await
            .map_err(|e| ServiceError::internal(format!("creating media directory: {e}")))?;
        tokio::fs::write(self.root.join(&path), bytes)
            .await
            .map_err(|e| ServiceError::internal(format!("writing upload: {e}")))?;

        info!(path = %path, "Upload stored");
        Ok(StoredFile {
            url: media_url(&path),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage(max_bytes: usize) -> MediaStorage {
        let root = std::env::temp_dir().join(format!("site-media-{}", Uuid::new_v4()));
        MediaStorage::new(root, max_bytes)
    }

    #[test]
    fn test_media_url() {
        assert_eq!(media_url("slides/2024/05/a.jpg"), "/media/slides/2024/05/a.jpg");
        assert_eq!(media_url("/static/img/logo.svg"), "/static/img/logo.svg");
        assert_eq!(media_url("https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");
    }

    #[tokio::test]
    async fn test_save_partitions_by_date() {
        let storage = temp_storage(1024);
        let stored = storage.save("portfolio", "Work.JPG", b"jpeg").await.unwrap();

        let now = Utc::now();
        let prefix = format!("portfolio/{:04}/{:02}/", now.year(), now.month());
        assert!(stored.path.starts_with(&prefix), "{}", stored.path);
        assert!(stored.path.ends_with(".jpg"));
        assert_eq!(stored.url, format!("/media/{}", stored.path));

        let written = tokio::fs::read(storage.root().join(&stored.path)).await.unwrap();
        assert_eq!(written, b"jpeg");

        let _ = tokio::fs::remove_dir_all(storage.root()).await;
    }

    #[tokio::test]
    async fn test_rejects_bad_uploads() {
        let storage = temp_storage(4);

        let err = storage.save("slides", "a.exe", b"x").await.unwrap_err();
        assert!(err.field_errors().unwrap().contains_key("file"));

        let err = storage.save("slides", "a.png", b"too large").await.unwrap_err();
        assert!(err.field_errors().is_some());

        let err = storage.save("../etc", "a.png", b"x").await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        assert!(tokio::fs::metadata(storage.root()).await.is_err());
    }
}
