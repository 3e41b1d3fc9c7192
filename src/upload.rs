//! Multipart upload handling: streams the `file` field to the upload
//! directory and hands the resulting metadata to the route handler.

use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use tokio::fs::{create_dir_all, File};
use tokio::io::AsyncWriteExt;
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;

/// A file persisted to the upload directory, plus the form fields that
/// accompanied it.
#[derive(Debug)]
pub struct UploadedFile {
    pub original_name: String,
    pub stored_path: PathBuf,
    pub size: u64,
    pub mime_type: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

/// Consumes the request's multipart body. The `file` field is written to
/// `upload_dir` chunk by chunk under a collision-free stored name; the
/// optional `description` and `date` (RFC 3339) text fields are collected
/// alongside. A request without a `file` field is rejected.
pub async fn receive(mut multipart: Multipart, upload_dir: &Path) -> Result<UploadedFile, ApiError> {
    let mut stored: Option<(String, PathBuf, u64, String)> = None;
    let mut description = String::new();
    let mut date = None;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                let original_name = basename(field.file_name().unwrap_or("unnamed"));
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                create_dir_all(upload_dir).await?;
                let stored_path = upload_dir.join(stored_name(&original_name));
                let mut file = File::create(&stored_path).await?;

                let mut size = 0u64;
                while let Some(chunk) = field.chunk().await? {
                    size += chunk.len() as u64;
                    file.write_all(&chunk).await?;
                }
                file.flush().await?;

                stored = Some((original_name, stored_path, size, mime_type));
            }
            "description" => description = field.text().await?,
            "date" => {
                let raw = field.text().await?;
                if !raw.trim().is_empty() {
                    let parsed = DateTime::parse_from_rfc3339(raw.trim())
                        .map_err(|_| ApiError::BadRequest(format!("invalid date: {raw}")))?;
                    date = Some(parsed.with_timezone(&Utc));
                }
            }
            _ => {}
        }
    }

    let Some((original_name, stored_path, size, mime_type)) = stored else {
        return Err(ApiError::BadRequest("No file uploaded".into()));
    };

    Ok(UploadedFile {
        original_name,
        stored_path,
        size,
        mime_type,
        description,
        date: date.unwrap_or_else(Utc::now),
    })
}

/// Compensating delete for an upload whose metadata insert failed. The disk
/// write and the insert are not transactional.
pub async fn discard(upload: &UploadedFile) {
    if let Err(err) = tokio::fs::remove_file(&upload.stored_path).await {
        warn!(
            path = %upload.stored_path.display(),
            "failed to remove orphaned upload: {err}"
        );
    }
}

// Client names may carry path components; only the final segment is kept.
fn basename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string())
}

// Repeated uploads of the same original name must not overwrite each other.
fn stored_name(original: &str) -> String {
    format!("{}_{}", Uuid::new_v4().simple(), original)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_names_never_collide() {
        let first = stored_name("notes.pdf");
        let second = stored_name("notes.pdf");

        assert_ne!(first, second);
        assert!(first.ends_with("_notes.pdf"));
        assert!(second.ends_with("_notes.pdf"));
    }

    #[test]
    fn basename_strips_directory_components() {
        assert_eq!(basename("notes.pdf"), "notes.pdf");
        assert_eq!(basename("../../etc/passwd"), "passwd");
        assert_eq!(basename(""), "unnamed");
        assert_eq!(basename(".."), "unnamed");
    }

    #[tokio::test]
    async fn discard_removes_the_stored_file() {
        let dir = std::env::temp_dir().join(format!("portal-{}", Uuid::new_v4().simple()));
        create_dir_all(&dir).await.unwrap();
        let path = dir.join(stored_name("notes.pdf"));
        tokio::fs::write(&path, b"content").await.unwrap();

        let upload = UploadedFile {
            original_name: "notes.pdf".into(),
            stored_path: path.clone(),
            size: 7,
            mime_type: "application/pdf".into(),
            description: String::new(),
            date: Utc::now(),
        };
        discard(&upload).await;

        assert!(!path.exists());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
