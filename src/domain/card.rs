use crate::{
    domain::{document::Document, project::Project},
    error::Result,
    storage::CollectionPath,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Well-known priority labels.
///
/// A card stores its priority as a free string; this enum is only a view over
/// the labels the board understands. Variants are declared in ascending
/// urgency so the derived ordering is usable for sorting.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    #[default]
    Low,
    Fuzzy,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Fuzzy => "FUZZY",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Parses a stored label, treating anything unrecognised as `Low`
    pub fn parse_lenient(label: &str) -> Self {
        label.parse().unwrap_or(Self::Low)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "FUZZY" => Ok(Self::Fuzzy),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(format!(
                "Invalid priority '{}'. Valid priorities: low, fuzzy, high, critical",
                s
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single issue or task on the board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub id: String,
    /// Kept on the card so cards can be queried per project
    pub project_id: String,
    pub lane_id: String,
    #[serde(default = "default_title")]
    pub title: String,
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    pub tags: Vec<String>,
    /// User ids
    pub assigned_to: Vec<String>,
    pub created_at: DateTime<Utc>,
}

fn default_title() -> String {
    Card::UNTITLED.to_string()
}

fn default_priority() -> String {
    Priority::Low.as_str().to_string()
}

impl Card {
    /// Title shown for a stored card that has none
    pub const UNTITLED: &'static str = "No Title";
    pub const COLLECTION: &'static str = "cards";

    /// Creates an unsaved card with `LOW` priority
    pub fn new(project_id: String, lane_id: String, title: String) -> Self {
        Self {
            id: String::new(),
            project_id,
            lane_id,
            title,
            description: String::new(),
            priority: Priority::Low.as_str().to_string(),
            tags: Vec::new(),
            assigned_to: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Appends a tag. Duplicates are kept.
    pub fn add_tag(&mut self, tag: String) {
        self.tags.push(tag);
    }

    pub fn assign(&mut self, user_id: String) {
        self.assigned_to.push(user_id);
    }

    /// Interprets the stored priority label
    pub fn priority_level(&self) -> Priority {
        Priority::parse_lenient(&self.priority)
    }

    pub fn collection_path(project_id: &str) -> Result<CollectionPath> {
        Project::doc_ref(project_id)?.subcollection(Self::COLLECTION)
    }
}

impl Document for Card {
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
