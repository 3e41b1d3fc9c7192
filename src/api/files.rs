use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::AppState;
use crate::error::ApiError;
use crate::models::file::StoredFile;
use crate::upload;

pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let uploaded = upload::receive(multipart, &state.upload_dir).await?;

    let record = StoredFile {
        id: None,
        filename: uploaded.original_name.clone(),
        description: uploaded.description.clone(),
        date: uploaded.date,
        path: uploaded.stored_path.to_string_lossy().into_owned(),
        comments: Vec::new(),
    };

    // The disk write is not transactional with the insert; drop the stored
    // file if the record cannot be written.
    if let Err(err) = state.file_repo.create(record).await {
        upload::discard(&uploaded).await;
        return Err(err.into());
    }

    Ok(Json(json!({
        "message": "File uploaded successfully",
        "filename": uploaded.original_name,
        "size": uploaded.size,
        "mime_type": uploaded.mime_type,
    })))
}

pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredFile>>, ApiError> {
    Ok(Json(state.file_repo.find_all().await?))
}

pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let file = state
        .file_repo
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound("File"))?;

    // A record whose stored file is gone is a server-side inconsistency.
    let bytes = tokio::fs::read(&file.path).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.filename.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
