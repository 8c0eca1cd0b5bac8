use crate::{
    error::{FuzzyError, Result},
    storage::{CollectionPath, DocumentBody, DocumentRef, Storage},
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed document store. Every document is one row keyed by its
/// collection path and id, with the body stored as JSON text.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens (or creates) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FuzzyError::StorageError(format!("lock poisoned: {e}")))?;
        f(&conn)
    }

    fn parse_body(text: &str) -> Result<DocumentBody> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(body) => Ok(body),
            _ => Err(FuzzyError::StorageError(
                "stored document is not a JSON object".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn initialize(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(
                "
                CREATE TABLE IF NOT EXISTS documents (
                    collection TEXT NOT NULL,
                    id         TEXT NOT NULL,
                    body       TEXT NOT NULL,
                    PRIMARY KEY (collection, id)
                );
                ",
            )?;
            Ok(())
        })
    }

    async fn put_document(&self, doc: &DocumentRef, body: &DocumentBody) -> Result<()> {
        let json = serde_json::to_string(body)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
                 ON CONFLICT(collection, id) DO UPDATE SET body = excluded.body",
                params![doc.collection().to_string(), doc.id(), json],
            )?;
            Ok(())
        })
    }

    async fn get_document(&self, doc: &DocumentRef) -> Result<Option<DocumentBody>> {
        let text: Option<String> = self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                    params![doc.collection().to_string(), doc.id()],
                    |row| row.get(0),
                )
                .optional()?)
        })?;

        text.as_deref().map(Self::parse_body).transpose()
    }

    async fn list_documents(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<(String, DocumentBody)>> {
        let rows: Vec<(String, String)> = self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, body FROM documents WHERE collection = ?1 ORDER BY id",
            )?;
            let rows = stmt
                .query_map(params![collection.to_string()], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        rows.into_iter()
            .map(|(id, text)| -> Result<(String, DocumentBody)> {
                Ok((id, Self::parse_body(&text)?))
            })
            .collect()
    }

    async fn delete_document(&self, doc: &DocumentRef) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![doc.collection().to_string(), doc.id()],
            )?;
            Ok(removed > 0)
        })
    }

    async fn is_initialized(&self) -> bool {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'documents'",
                [],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .unwrap_or(false)
    }
}
