//! Typed document access on top of a [`Storage`] backend.

use crate::{
    domain::document::{from_body, to_body, Document},
    error::{FuzzyError, Result},
    storage::{CollectionPath, DocumentBody, DocumentRef, Storage},
};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use uuid::Uuid;

/// Database handle handed out by the client app.
///
/// Cloning is cheap; clones share the backend and the closed flag.
#[derive(Clone)]
pub struct Database {
    storage: Arc<dyn Storage>,
    closed: Arc<AtomicBool>,
}

impl Database {
    /// Initializes the backend and wraps it
    pub async fn open(storage: Arc<dyn Storage>) -> Result<Self> {
        storage.initialize().await?;
        Ok(Self {
            storage,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Generates a fresh document id
    pub fn generate_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn decode<T: Document>(
        collection: &CollectionPath,
        id: &str,
        body: DocumentBody,
    ) -> Result<T> {
        let mut record: T = from_body(id, body)?;
        record.restore_parent(collection);
        Ok(record)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(FuzzyError::ClientClosed)
        } else {
            Ok(())
        }
    }

    /// Stores `record` under a newly generated id and writes the id back
    pub async fn add<T: Document>(&self, record: &mut T) -> Result<String> {
        self.ensure_open()?;
        let id = Self::generate_id();
        record.set_id(id.clone());
        self.set(record).await?;
        Ok(id)
    }

    /// Creates or replaces the record's document
    pub async fn set<T: Document>(&self, record: &T) -> Result<()> {
        self.ensure_open()?;
        let doc = record.document_ref()?;
        let body = to_body(record)?;
        self.storage.put_document(&doc, &body).await?;
        tracing::debug!(document = %doc, "document written");
        Ok(())
    }

    pub async fn get<T: Document>(&self, doc: &DocumentRef) -> Result<Option<T>> {
        self.ensure_open()?;
        match self.storage.get_document(doc).await? {
            Some(body) => Self::decode(doc.collection(), doc.id(), body).map(Some),
            None => Ok(None),
        }
    }

    /// Loads every record in a collection, ordered by document id
    pub async fn list<T: Document>(&self, collection: &CollectionPath) -> Result<Vec<T>> {
        self.ensure_open()?;
        self.storage
            .list_documents(collection)
            .await?
            .into_iter()
            .map(|(id, body)| Self::decode(collection, &id, body))
            .collect()
    }

    /// Overwrites a single field of an existing document
    pub async fn update_field(&self, doc: &DocumentRef, field: &str, value: Value) -> Result<()> {
        self.ensure_open()?;
        if field == "id" {
            return Err(FuzzyError::StorageError(
                "document id cannot be updated".to_string(),
            ));
        }

        let mut body = self
            .storage
            .get_document(doc)
            .await?
            .ok_or_else(|| FuzzyError::DocumentNotFound(doc.to_string()))?;
        body.insert(field.to_string(), value);
        self.storage.put_document(doc, &body).await?;
        tracing::debug!(document = %doc, field, "document field updated");
        Ok(())
    }

    /// Deletes a document; returns `false` if it did not exist
    pub async fn delete(&self, doc: &DocumentRef) -> Result<bool> {
        self.ensure_open()?;
        self.storage.delete_document(doc).await
    }

    /// Releases the handle. Further calls fail with [`FuzzyError::ClientClosed`].
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("database handle closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, Lane, Project};
    use crate::storage::memory_storage::MemoryStorage;
    use serde_json::json;

    async fn database() -> Database {
        Database::open(Arc::new(MemoryStorage::new())).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_assigns_id() {
        let db = database().await;
        let mut project = Project::new("Fuzzy-Go Mobile App".to_string(), "u1".to_string());

        let id = db.add(&mut project).await.unwrap();
        assert_eq!(project.id, id);
        assert_eq!(id.len(), 32);

        let loaded: Project = db
            .get(&Project::doc_ref(&id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, project);
    }

    #[tokio::test]
    async fn test_generated_ids_are_unique() {
        assert_ne!(Database::generate_id(), Database::generate_id());
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = database().await;
        let missing: Option<Project> = db.get(&Project::doc_ref("nope").unwrap()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_collection() {
        let db = database().await;
        for (title, index) in [("A", 0), ("B", 1)] {
            let mut lane = Lane::new("p1".to_string(), title.to_string(), index);
            db.add(&mut lane).await.unwrap();
        }

        let lanes: Vec<Lane> = db.list(&Lane::collection_path("p1").unwrap()).await.unwrap();
        assert_eq!(lanes.len(), 2);
        assert!(lanes.iter().all(|lane| !lane.id.is_empty()));

        let other: Vec<Lane> = db.list(&Lane::collection_path("p2").unwrap()).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_update_field() {
        let db = database().await;
        let mut card = Card::new("p1".to_string(), "todo".to_string(), "Task".to_string());
        db.add(&mut card).await.unwrap();

        let doc = card.document_ref().unwrap();
        db.update_field(&doc, "lane_id", json!("done")).await.unwrap();

        let loaded: Card = db.get(&doc).await.unwrap().unwrap();
        assert_eq!(loaded.lane_id, "done");
        assert_eq!(loaded.title, "Task");
    }

    #[tokio::test]
    async fn test_update_field_requires_document() {
        let db = database().await;
        let doc = Card::collection_path("p1").unwrap().doc("ghost").unwrap();

        let err = db.update_field(&doc, "lane_id", json!("done")).await.unwrap_err();
        assert!(matches!(err, FuzzyError::DocumentNotFound(_)));

        let err = db.update_field(&doc, "id", json!("x")).await.unwrap_err();
        assert!(matches!(err, FuzzyError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_closed_handle_rejects_calls() {
        let db = database().await;
        let other = db.clone();
        db.close();
        db.close();

        assert!(other.is_closed());
        let mut project = Project::new("Late".to_string(), "u1".to_string());
        let err = other.add(&mut project).await.unwrap_err();
        assert!(matches!(err, FuzzyError::ClientClosed));
    }
}
