use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use crate::models::comment::Comment;

pub struct CommentRepository {
    collection: Collection<Comment>,
}

impl CommentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("comments"),
        }
    }

    pub async fn create(&self, comment: Comment) -> mongodb::error::Result<()> {
        self.collection.insert_one(comment, None).await?;
        Ok(())
    }

    /// Resolves comment references, returned in the order of `ids`.
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> mongodb::error::Result<Vec<Comment>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids } }, None)
            .await?;

        let mut comments = Vec::new();
        while let Some(comment) = cursor.try_next().await? {
            comments.push(comment);
        }
        Ok(order_by_ids(ids, comments))
    }
}

// `$in` yields documents in collection order, not argument order.
fn order_by_ids(ids: &[ObjectId], mut comments: Vec<Comment>) -> Vec<Comment> {
    let mut ordered = Vec::with_capacity(comments.len());
    for id in ids {
        if let Some(pos) = comments.iter().position(|c| c.id == Some(*id)) {
            ordered.push(comments.swap_remove(pos));
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: ObjectId, text: &str) -> Comment {
        Comment {
            id: Some(id),
            text: text.into(),
            file: ObjectId::new(),
        }
    }

    #[test]
    fn reorders_to_match_the_reference_list() {
        let (a, b, c) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        let fetched = vec![comment(c, "third"), comment(a, "first"), comment(b, "second")];

        let ordered = order_by_ids(&[a, b, c], fetched);

        let texts: Vec<&str> = ordered.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn dangling_references_are_skipped() {
        let (a, missing) = (ObjectId::new(), ObjectId::new());
        let fetched = vec![comment(a, "only")];

        let ordered = order_by_ids(&[missing, a], fetched);

        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].text, "only");
    }
}
