use crate::{
    domain::{document::Document, project::Project},
    error::Result,
    storage::CollectionPath,
};
use serde::{Deserialize, Serialize};

/// A column within a project (e.g. "Backlog", "In Review")
///
/// `order_index` is assigned by the caller and only used for sorting. Nothing
/// prevents two lanes of one project from sharing an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lane {
    pub id: String,
    pub project_id: String,
    #[serde(default = "default_title")]
    pub title: String,
    pub order_index: i64,
}

fn default_title() -> String {
    Lane::UNTITLED.to_string()
}

impl Lane {
    pub const COLLECTION: &'static str = "lanes";
    pub const UNTITLED: &'static str = "Untitled";

    /// Lanes every new project starts with, in board order
    pub const DEFAULT_TITLES: [&'static str; 3] = ["To Do", "In Progress", "Done"];

    pub fn new(project_id: String, title: String, order_index: i64) -> Self {
        Self {
            id: String::new(),
            project_id,
            title,
            order_index,
        }
    }

    /// The default lanes for a freshly created project
    pub fn defaults_for(project_id: &str) -> Vec<Self> {
        Self::DEFAULT_TITLES
            .iter()
            .zip(0_i64..)
            .map(|(title, index)| Self::new(project_id.to_string(), title.to_string(), index))
            .collect()
    }

    pub fn collection_path(project_id: &str) -> Result<CollectionPath> {
        Project::doc_ref(project_id)?.subcollection(Self::COLLECTION)
    }
}

impl Document for Lane {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn collection(&self) -> Result<CollectionPath> {
        Self::collection_path(&self.project_id)
    }

    fn restore_parent(&mut self, collection: &CollectionPath) {
        if self.project_id.is_empty() {
            if let Some(project) = collection.parent() {
                self.project_id = project.id().to_string();
            }
        }
    }
}
