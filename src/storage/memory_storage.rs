//! In-memory document store, used by tests and ephemeral sessions.

use crate::{
    error::{FuzzyError, Result},
    storage::{CollectionPath, DocumentBody, DocumentRef, Storage},
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory document store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    initialized: bool,
    collections: HashMap<CollectionPath, BTreeMap<String, DocumentBody>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&MemoryState) -> T) -> Result<T> {
        let state = self
            .state
            .read()
            .map_err(|e| FuzzyError::StorageError(format!("lock poisoned: {e}")))?;
        Ok(f(&state))
    }

    fn write<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> Result<T> {
        let mut state = self
            .state
            .write()
            .map_err(|e| FuzzyError::StorageError(format!("lock poisoned: {e}")))?;
        Ok(f(&mut state))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<()> {
        self.write(|state| state.initialized = true)
    }

    async fn put_document(&self, doc: &DocumentRef, body: &DocumentBody) -> Result<()> {
        self.write(|state| {
            state
                .collections
                .entry(doc.collection().clone())
                .or_default()
                .insert(doc.id().to_string(), body.clone());
        })
    }

    async fn get_document(&self, doc: &DocumentRef) -> Result<Option<DocumentBody>> {
        self.read(|state| {
            state
                .collections
                .get(doc.collection())
                .and_then(|docs| docs.get(doc.id()))
                .cloned()
        })
    }

    async fn list_documents(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<(String, DocumentBody)>> {
        self.read(|state| {
            state
                .collections
                .get(collection)
                .map(|docs| {
                    docs.iter()
                        .map(|(id, body)| (id.clone(), body.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    async fn delete_document(&self, doc: &DocumentRef) -> Result<bool> {
        self.write(|state| {
            state
                .collections
                .get_mut(doc.collection())
                .map(|docs| docs.remove(doc.id()).is_some())
                .unwrap_or(false)
        })
    }

    async fn is_initialized(&self) -> bool {
        self.read(|state| state.initialized).unwrap_or(false)
    }
}
