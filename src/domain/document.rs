//! Conversion between records and document bodies.
//!
//! On the wire a record carries its `id`; in the document store the id is the
//! document reference and is stripped from the body.

use crate::{
    error::{FuzzyError, Result},
    storage::{CollectionPath, DocumentBody, DocumentRef},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

const ID_FIELD: &str = "id";

/// A record that is persisted as a document in a collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Collection the record is stored in
    fn collection(&self) -> Result<CollectionPath>;

    /// Fills fields implied by the collection the record was read from
    fn restore_parent(&mut self, _collection: &CollectionPath) {}

    /// Reference to this record's document. Fails if the id is unset.
    fn document_ref(&self) -> Result<DocumentRef> {
        self.collection()?.doc(self.id())
    }
}

/// Encodes a record as a document body, dropping its id
pub fn to_body<T: Document>(record: &T) -> Result<DocumentBody> {
    match serde_json::to_value(record)? {
        Value::Object(mut body) => {
            body.remove(ID_FIELD);
            Ok(body)
        }
        other => Err(FuzzyError::StorageError(format!(
            "record did not encode to an object: {other}"
        ))),
    }
}

/// Decodes a document body and restores the id from its reference
pub fn from_body<T: Document>(id: &str, mut body: DocumentBody) -> Result<T> {
    // A stray id in the body never wins over the reference
    body.remove(ID_FIELD);
    let mut record: T = serde_json::from_value(Value::Object(body))?;
    record.set_id(id.to_string());
    Ok(record)
}
