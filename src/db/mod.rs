use std::path::PathBuf;

use mongodb::{Client, Database};

use crate::repository::comment_repo::CommentRepository;
use crate::repository::file_repo::FileRepository;
use crate::repository::user_repo::UserRepository;

const DEFAULT_DB_NAME: &str = "student_resource_portal";

/// Shared handles for every route handler, built once at startup.
pub struct AppState {
    pub user_repo: UserRepository,
    pub file_repo: FileRepository,
    pub comment_repo: CommentRepository,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(db: &Database, upload_dir: PathBuf) -> Self {
        Self {
            user_repo: UserRepository::new(db),
            file_repo: FileRepository::new(db),
            comment_repo: CommentRepository::new(db),
            upload_dir,
        }
    }
}

/// Connects to MongoDB. The database name comes from the URI path when one
/// is present.
pub async fn init_db(uri: &str) -> mongodb::error::Result<Database> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DB_NAME)))
}
