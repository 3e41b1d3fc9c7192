/// Route handlers.
pub mod api;

/// Database connection and shared application state.
pub mod db;

/// Error types.
pub mod error;

/// BSON document types and request payloads.
pub mod models;

/// One repository per collection.
pub mod repository;

/// Multipart upload handling.
pub mod upload;

use std::sync::Arc;

use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::db::AppState;

/// Builds the full route table over a shared [`AppState`]. Anything not
/// matched by a route is served statically from `public/`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/login.html") }))
        .route("/signup", post(api::auth::signup))
        .route("/login", post(api::auth::login))
        .route("/upload", post(api::files::upload_file))
        .route("/files", get(api::files::list_files))
        .route("/download/:id", get(api::files::download_file))
        .route(
            "/files/:id/comments",
            get(api::comments::list_comments).post(api::comments::add_comment),
        )
        .fallback_service(ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
