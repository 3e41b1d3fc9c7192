use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Catalog entry in the `files` collection.
///
/// `filename` is the client-supplied name and is what downloads are served
/// as; `path` points at the uniquified on-disk copy. `comments` holds the
/// ids of this file's comments in the order they were added.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoredFile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub filename: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub path: String,
    #[serde(default)]
    pub comments: Vec<ObjectId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn round_trips_through_bson_with_a_native_date() {
        let file = StoredFile {
            id: Some(ObjectId::new()),
            filename: "notes.pdf".into(),
            description: "lecture notes".into(),
            date: Utc::now(),
            path: "uploads/abc_notes.pdf".into(),
            comments: vec![ObjectId::new()],
        };

        let doc = bson::to_document(&file).unwrap();
        assert!(doc.contains_key("_id"));
        assert!(doc.get_datetime("date").is_ok(), "date must store as a BSON date");

        let back: StoredFile = bson::from_document(doc).unwrap();
        assert_eq!(back.filename, "notes.pdf");
        assert_eq!(back.comments.len(), 1);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let doc = bson::doc! {
            "filename": "a.txt",
            "date": bson::DateTime::now(),
            "path": "uploads/a.txt",
        };

        let file: StoredFile = bson::from_document(doc).unwrap();
        assert!(file.id.is_none());
        assert!(file.description.is_empty());
        assert!(file.comments.is_empty());
    }
}
