use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use resource_portal::db::{self, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mongo_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017/student_resource_portal".to_string());
    let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));
    let port = env::var("PORT").unwrap_or_else(|_| "4000".to_string());

    let database = db::init_db(&mongo_uri)
        .await
        .expect("failed to connect to MongoDB");

    tokio::fs::create_dir_all(&upload_dir)
        .await
        .expect("failed to create upload directory");

    let state = Arc::new(AppState::new(&database, upload_dir));

    state
        .user_repo
        .ensure_indexes()
        .await
        .expect("failed to create user indexes");

    let addr: SocketAddr = format!("0.0.0.0:{port}")
        .parse()
        .expect("invalid listen address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");

    info!("listening on http://{addr}");

    axum::serve(listener, resource_portal::router(state))
        .await
        .expect("server error");
}
