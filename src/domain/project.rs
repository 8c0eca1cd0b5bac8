use crate::{
    domain::document::Document,
    error::Result,
    storage::{CollectionPath, DocumentRef},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level board grouping lanes and cards (e.g. "Fuzzy-Go Mobile App")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    pub description: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    /// Hex code
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
}

fn default_name() -> String {
    Project::UNTITLED.to_string()
}

fn default_theme_color() -> String {
    Project::DEFAULT_THEME_COLOR.to_string()
}

impl Project {
    pub const COLLECTION: &'static str = "projects";
    pub const DEFAULT_THEME_COLOR: &'static str = "#6200EE";
    pub const UNTITLED: &'static str = "Untitled Project";

    /// Creates an unsaved project owned by `owner_id`
    pub fn new(name: String, owner_id: String) -> Self {
        Self {
            id: String::new(),
            name,
            description: String::new(),
            owner_id,
            created_at: Utc::now(),
            theme_color: Self::DEFAULT_THEME_COLOR.to_string(),
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_theme_color(mut self, theme_color: String) -> Self {
        self.theme_color = theme_color;
        self
    }

    pub fn collection_path() -> Result<CollectionPath> {
        CollectionPath::root(Self::COLLECTION)
    }

    /// Reference to the project document with the given id
    pub fn doc_ref(project_id: &str) -> Result<DocumentRef> {
        Self::collection_path()?.doc(project_id)
    }
}

impl Document for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn collection(&self) -> Result<CollectionPath> {
        Self::collection_path()
    }
}
