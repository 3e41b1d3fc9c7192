use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use crate::models::file::StoredFile;

pub struct FileRepository {
    collection: Collection<StoredFile>,
}

impl FileRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("files"),
        }
    }

    pub async fn create(&self, file: StoredFile) -> mongodb::error::Result<()> {
        self.collection.insert_one(file, None).await?;
        Ok(())
    }

    /// All files in natural collection order.
    pub async fn find_all(&self) -> mongodb::error::Result<Vec<StoredFile>> {
        let mut cursor = self.collection.find(None, None).await?;

        let mut files = Vec::new();
        while let Some(file) = cursor.try_next().await? {
            files.push(file);
        }
        Ok(files)
    }

    /// An id that does not parse as an ObjectId can never match a document.
    pub async fn find_by_id(&self, id: &str) -> mongodb::error::Result<Option<StoredFile>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        self.collection.find_one(doc! { "_id": oid }, None).await
    }

    pub async fn push_comment(
        &self,
        file_id: ObjectId,
        comment_id: ObjectId,
    ) -> mongodb::error::Result<()> {
        self.collection
            .update_one(
                doc! { "_id": file_id },
                doc! { "$push": { "comments": comment_id } },
                None,
            )
            .await?;
        Ok(())
    }
}
