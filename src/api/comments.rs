use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use crate::db::AppState;
use crate::error::ApiError;
use crate::models::comment::{Comment, CommentRequest};

pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<CommentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let file = state
        .file_repo
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound("File"))?;
    let file_id = file.id.ok_or(ApiError::NotFound("File"))?;

    // Client-generated id, so the back-reference and the file's comment
    // list can be written without re-reading the insert result.
    let comment_id = ObjectId::new();
    state
        .comment_repo
        .create(Comment {
            id: Some(comment_id),
            text: payload.text,
            file: file_id,
        })
        .await?;
    state.file_repo.push_comment(file_id, comment_id).await?;

    Ok(Json(json!({ "message": "Comment added successfully" })))
}

pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let file = state
        .file_repo
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound("File"))?;

    Ok(Json(state.comment_repo.find_by_ids(&file.comments).await?))
}
