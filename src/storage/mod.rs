use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub mod file_storage;
pub mod memory_storage;
pub mod path;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_storage;

pub use path::{CollectionPath, DocumentRef};

/// Field map of a stored document. The document id lives in its
/// [`DocumentRef`], never in the body.
pub type DocumentBody = Map<String, Value>;

/// Storage trait for persisting documents grouped into collections
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Creates or replaces a document
    async fn put_document(&self, doc: &DocumentRef, body: &DocumentBody) -> Result<()>;

    /// Loads a document body, or `None` if the document does not exist
    async fn get_document(&self, doc: &DocumentRef) -> Result<Option<DocumentBody>>;

    /// Lists every document in a collection as `(id, body)` pairs, ordered by id
    async fn list_documents(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<(String, DocumentBody)>>;

    /// Deletes a document. Subcollections are left untouched.
    ///
    /// Returns `false` when there was nothing to delete.
    async fn delete_document(&self, doc: &DocumentRef) -> Result<bool>;

    /// Checks if the store has been initialized
    async fn is_initialized(&self) -> bool;
}
