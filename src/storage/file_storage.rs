use crate::{
    error::{FuzzyError, Result},
    storage::{CollectionPath, DocumentBody, DocumentRef, Storage},
};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// File-based document store.
///
/// Each collection is a directory and each document a pretty-printed JSON
/// file named `<id>.json`, so `projects/p1/lanes/l1` lives at
/// `<root>/projects/p1/lanes/l1.json` next to `<root>/projects/p1.json`.
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const DOCUMENT_EXTENSION: &'static str = "json";

    /// Creates a new FileStorage rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().to_path_buf(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn collection_dir(&self, collection: &CollectionPath) -> PathBuf {
        collection
            .segments()
            .iter()
            .fold(self.root_path.clone(), |dir, segment| dir.join(segment))
    }

    fn document_file(&self, doc: &DocumentRef) -> PathBuf {
        self.collection_dir(doc.collection())
            .join(format!("{}.{}", doc.id(), Self::DOCUMENT_EXTENSION))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    async fn read_body(path: &Path) -> Result<DocumentBody> {
        let contents = fs::read_to_string(path).await?;
        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(body) => Ok(body),
            _ => Err(FuzzyError::StorageError(format!(
                "document at {} is not a JSON object",
                path.display()
            ))),
        }
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        tracing::debug!(root = %self.root_path.display(), "file storage initialized");
        Ok(())
    }

    async fn put_document(&self, doc: &DocumentRef, body: &DocumentBody) -> Result<()> {
        self.ensure_directory_exists(&self.collection_dir(doc.collection()))
            .await?;

        // Readers never observe a half-written document
        let target = self.document_file(doc);
        let staging = target.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        let json = serde_json::to_string_pretty(body)?;
        fs::write(&staging, json).await?;
        if let Err(err) = fs::rename(&staging, &target).await {
            let _ = fs::remove_file(&staging).await;
            return Err(err.into());
        }
        Ok(())
    }

    async fn get_document(&self, doc: &DocumentRef) -> Result<Option<DocumentBody>> {
        let file_path = self.document_file(doc);

        if !file_path.exists() {
            return Ok(None);
        }

        Self::read_body(&file_path).await.map(Some)
    }

    async fn list_documents(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<(String, DocumentBody)>> {
        let dir = self.collection_dir(collection);

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&dir).await?;
        let mut documents = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            // Subcollection directories may also end in `.json`
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(Self::DOCUMENT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                let body = Self::read_body(&path).await?;
                documents.push((stem.to_string(), body));
            }
        }

        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents)
    }

    async fn delete_document(&self, doc: &DocumentRef) -> Result<bool> {
        let file_path = self.document_file(doc);

        if !file_path.exists() {
            return Ok(false);
        }

        fs::remove_file(file_path).await?;
        Ok(true)
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.is_dir()
    }
}
