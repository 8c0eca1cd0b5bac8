use crate::error::{FuzzyError, Result};
use std::fmt;

/// Path to a collection of documents, e.g. `projects` or `projects/p1/cards`.
///
/// Segments alternate collection name / document id, so a valid collection
/// path always has an odd number of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Creates a top-level collection path
    pub fn root(name: &str) -> Result<Self> {
        validate_segment(name)?;
        Ok(Self {
            segments: vec![name.to_string()],
        })
    }

    /// Parses a slash-separated collection path
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path.split('/').map(str::to_string).collect();
        if segments.len() % 2 == 0 {
            return Err(FuzzyError::InvalidPath(path.to_string()));
        }
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self { segments })
    }

    /// Returns a reference to the document `id` inside this collection
    pub fn doc(&self, id: &str) -> Result<DocumentRef> {
        validate_segment(id)?;
        Ok(DocumentRef {
            collection: self.clone(),
            id: id.to_string(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The document this collection is nested under, if any
    pub fn parent(&self) -> Option<DocumentRef> {
        let len = self.segments.len();
        if len < 3 {
            return None;
        }
        Some(DocumentRef {
            collection: CollectionPath {
                segments: self.segments[..len - 2].to_vec(),
            },
            id: self.segments[len - 2].clone(),
        })
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Reference to a single document: its parent collection plus its id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    collection: CollectionPath,
    id: String,
}

impl DocumentRef {
    pub fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns a subcollection nested under this document
    pub fn subcollection(&self, name: &str) -> Result<CollectionPath> {
        validate_segment(name)?;
        let mut segments = self.collection.segments.clone();
        segments.push(self.id.clone());
        segments.push(name.to_string());
        Ok(CollectionPath { segments })
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

// Segments double as file names in the file-backed store.
fn validate_segment(segment: &str) -> Result<()> {
    let invalid = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(|c: char| c == '/' || c == '\\')
        || segment.chars().any(char::is_control);

    if invalid {
        Err(FuzzyError::InvalidPath(segment.to_string()))
    } else {
        Ok(())
    }
}
