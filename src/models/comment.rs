use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Comment document in the `comments` collection. `file` is the
/// back-reference to the owning [`StoredFile`](super::file::StoredFile).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub text: String,
    pub file: ObjectId,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}
