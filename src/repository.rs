//! Board operations: projects, lanes, cards and the assembled board view.

use crate::{
    database::Database,
    domain::{Board, Card, Document, Lane, Priority, Project},
    error::{FuzzyError, Result},
};
use serde_json::Value;

/// Repository for project boards backed by a [`Database`]
#[derive(Clone)]
pub struct BoardRepository {
    db: Database,
}

impl BoardRepository {
    const QUICK_CARD_DESCRIPTION: &'static str = "Created via CLI";

    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Creates a project and seeds it with the default lanes
    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
        owner_id: &str,
    ) -> Result<Project> {
        let mut project = Project::new(name.to_string(), owner_id.to_string())
            .with_description(description.to_string());
        self.db.add(&mut project).await?;

        for mut lane in Lane::defaults_for(&project.id) {
            self.db.add(&mut lane).await?;
        }

        tracing::info!(project_id = %project.id, name, "project created");
        Ok(project)
    }

    /// All projects, newest first
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = self.db.list(&Project::collection_path()?).await?;
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.db
            .get(&Project::doc_ref(project_id)?)
            .await?
            .ok_or_else(|| FuzzyError::ProjectNotFound(project_id.to_string()))
    }

    /// Deletes the project document only; its lanes and cards stay behind
    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        if !self.db.delete(&Project::doc_ref(project_id)?).await? {
            return Err(FuzzyError::ProjectNotFound(project_id.to_string()));
        }
        tracing::info!(project_id, "project deleted");
        Ok(())
    }

    /// Adds a lane. The order index is not checked against sibling lanes.
    pub async fn add_lane(&self, project_id: &str, title: &str, order_index: i64) -> Result<Lane> {
        let mut lane = Lane::new(project_id.to_string(), title.to_string(), order_index);
        self.db.add(&mut lane).await?;
        Ok(lane)
    }

    pub async fn get_lane(&self, project_id: &str, lane_id: &str) -> Result<Lane> {
        self.db
            .get(&Lane::collection_path(project_id)?.doc(lane_id)?)
            .await?
            .ok_or_else(|| FuzzyError::LaneNotFound(lane_id.to_string()))
    }

    /// Lanes of a project in board order
    pub async fn list_lanes(&self, project_id: &str) -> Result<Vec<Lane>> {
        let mut lanes: Vec<Lane> = self.db.list(&Lane::collection_path(project_id)?).await?;
        lanes.sort_by_key(|lane| lane.order_index);
        Ok(lanes)
    }

    /// Creates a card in the given lane
    pub async fn create_card(
        &self,
        project_id: &str,
        lane_id: &str,
        title: &str,
        description: &str,
        priority: Priority,
    ) -> Result<Card> {
        let mut card = Card::new(project_id.to_string(), lane_id.to_string(), title.to_string())
            .with_description(description.to_string())
            .with_priority(priority.as_str());
        self.db.add(&mut card).await?;

        tracing::info!(project_id, lane_id, card_id = %card.id, "card created");
        Ok(card)
    }

    /// Creates a low-priority placeholder card
    pub async fn add_card(&self, project_id: &str, lane_id: &str, title: &str) -> Result<Card> {
        self.create_card(
            project_id,
            lane_id,
            title,
            Self::QUICK_CARD_DESCRIPTION,
            Priority::Low,
        )
        .await
    }

    pub async fn get_card(&self, project_id: &str, card_id: &str) -> Result<Card> {
        self.db
            .get(&Card::collection_path(project_id)?.doc(card_id)?)
            .await?
            .ok_or_else(|| FuzzyError::CardNotFound(card_id.to_string()))
    }

    pub async fn list_cards(&self, project_id: &str) -> Result<Vec<Card>> {
        self.db.list(&Card::collection_path(project_id)?).await
    }

    /// Moves a card by rewriting its `lane_id`. The target lane is not checked.
    pub async fn move_card_to_lane(
        &self,
        project_id: &str,
        card_id: &str,
        new_lane_id: &str,
    ) -> Result<()> {
        let doc = Card::collection_path(project_id)?.doc(card_id)?;
        match self
            .db
            .update_field(&doc, "lane_id", Value::String(new_lane_id.to_string()))
            .await
        {
            Ok(()) => {
                tracing::info!(card_id, new_lane_id, "card moved");
                Ok(())
            }
            Err(FuzzyError::DocumentNotFound(_)) => {
                tracing::warn!(card_id, "failed to move card: not found");
                Err(FuzzyError::CardNotFound(card_id.to_string()))
            }
            Err(err) => {
                tracing::warn!(card_id, error = %err, "failed to move card");
                Err(err)
            }
        }
    }

    /// Replaces a stored card with `card`
    pub async fn update_card(&self, card: &Card) -> Result<()> {
        let doc = card.document_ref()?;
        if self.db.get::<Card>(&doc).await?.is_none() {
            return Err(FuzzyError::CardNotFound(card.id.clone()));
        }
        self.db.set(card).await
    }

    /// Assembles the board for a project from its lanes and cards
    pub async fn board(&self, project_id: &str) -> Result<Board> {
        let lanes = self.db.list(&Lane::collection_path(project_id)?).await?;
        let cards = self.list_cards(project_id).await?;
        let board = Board::assemble(project_id.to_string(), lanes, cards);

        if !board.orphaned_cards.is_empty() {
            tracing::warn!(
                project_id,
                orphaned = board.orphaned_cards.len(),
                "cards reference lanes that do not exist"
            );
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{file_storage::FileStorage, memory_storage::MemoryStorage, Storage};
    use chrono::Duration;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn repository() -> BoardRepository {
        let db = Database::open(Arc::new(MemoryStorage::new())).await.unwrap();
        BoardRepository::new(db)
    }

    #[tokio::test]
    async fn test_create_project_seeds_default_lanes() {
        let repo = repository().await;
        let project = repo
            .create_project("Fuzzy-Go Mobile App", "Android client", "u1")
            .await
            .unwrap();

        assert_eq!(project.owner_id, "u1");
        assert_eq!(project.theme_color, "#6200EE");

        let lanes = repo.list_lanes(&project.id).await.unwrap();
        let titles: Vec<&str> = lanes.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        assert_eq!(
            lanes.iter().map(|l| l.order_index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[tokio::test]
    async fn test_list_projects_newest_first() {
        let repo = repository().await;
        let older = repo.create_project("Older", "", "u1").await.unwrap();
        let newer = repo.create_project("Newer", "", "u1").await.unwrap();

        // Pin timestamps so ordering does not depend on clock resolution
        let mut backdated = older.clone();
        backdated.created_at = newer.created_at - Duration::hours(1);
        repo.database().set(&backdated).await.unwrap();

        let projects = repo.list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].id, newer.id);
        assert_eq!(projects[1].id, older.id);
    }

    #[tokio::test]
    async fn test_get_and_delete_project() {
        let repo = repository().await;
        let project = repo.create_project("Board", "", "u1").await.unwrap();

        assert_eq!(repo.get_project(&project.id).await.unwrap(), project);

        repo.delete_project(&project.id).await.unwrap();
        assert!(matches!(
            repo.get_project(&project.id).await.unwrap_err(),
            FuzzyError::ProjectNotFound(_)
        ));
        assert!(matches!(
            repo.delete_project(&project.id).await.unwrap_err(),
            FuzzyError::ProjectNotFound(_)
        ));

        // Lanes are not cascaded
        assert_eq!(repo.list_lanes(&project.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_card() {
        let repo = repository().await;
        let project = repo.create_project("Board", "", "u1").await.unwrap();
        let lanes = repo.list_lanes(&project.id).await.unwrap();

        let card = repo
            .create_card(
                &project.id,
                &lanes[0].id,
                "Crash on launch",
                "Happens on Android 14",
                Priority::Critical,
            )
            .await
            .unwrap();

        assert_eq!(card.priority, "CRITICAL");
        assert!(card.tags.is_empty());

        let loaded = repo.get_card(&project.id, &card.id).await.unwrap();
        assert_eq!(loaded, card);
    }

    #[tokio::test]
    async fn test_add_card_defaults() {
        let repo = repository().await;
        let card = repo.add_card("p1", "l1", "New Task").await.unwrap();

        assert_eq!(card.description, "Created via CLI");
        assert_eq!(card.priority_level(), Priority::Low);
    }

    #[tokio::test]
    async fn test_move_card_to_lane() {
        let repo = repository().await;
        let project = repo.create_project("Board", "", "u1").await.unwrap();
        let lanes = repo.list_lanes(&project.id).await.unwrap();
        let card = repo
            .add_card(&project.id, &lanes[0].id, "Task")
            .await
            .unwrap();

        repo.move_card_to_lane(&project.id, &card.id, &lanes[2].id)
            .await
            .unwrap();

        let board = repo.board(&project.id).await.unwrap();
        assert!(board.lane(&lanes[0].id).unwrap().cards.is_empty());
        assert_eq!(board.lane(&lanes[2].id).unwrap().cards[0].id, card.id);
    }

    #[tokio::test]
    async fn test_move_missing_card() {
        let repo = repository().await;
        let err = repo
            .move_card_to_lane("p1", "ghost", "l1")
            .await
            .unwrap_err();
        assert!(matches!(err, FuzzyError::CardNotFound(id) if id == "ghost"));
    }

    #[tokio::test]
    async fn test_move_to_unknown_lane_orphans_card() {
        let repo = repository().await;
        let project = repo.create_project("Board", "", "u1").await.unwrap();
        let lanes = repo.list_lanes(&project.id).await.unwrap();
        let card = repo
            .add_card(&project.id, &lanes[0].id, "Task")
            .await
            .unwrap();

        repo.move_card_to_lane(&project.id, &card.id, "no-such-lane")
            .await
            .unwrap();

        let board = repo.board(&project.id).await.unwrap();
        assert_eq!(board.card_count(), 0);
        assert_eq!(board.orphaned_cards.len(), 1);
    }

    #[tokio::test]
    async fn test_lanes_may_share_order_index() {
        let repo = repository().await;
        let project = repo.create_project("Board", "", "u1").await.unwrap();

        repo.add_lane(&project.id, "Review", 1).await.unwrap();

        let lanes = repo.list_lanes(&project.id).await.unwrap();
        assert_eq!(lanes.len(), 4);
        assert_eq!(lanes.iter().filter(|l| l.order_index == 1).count(), 2);

        let review = lanes.iter().find(|l| l.title == "Review").unwrap();
        assert_eq!(repo.get_lane(&project.id, &review.id).await.unwrap(), *review);
        assert!(matches!(
            repo.get_lane(&project.id, "ghost").await.unwrap_err(),
            FuzzyError::LaneNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_update_card() {
        let repo = repository().await;
        let mut card = repo.add_card("p1", "l1", "Task").await.unwrap();

        card.add_tag("ui".to_string());
        card.assign("u2".to_string());
        repo.update_card(&card).await.unwrap();

        let loaded = repo.get_card("p1", &card.id).await.unwrap();
        assert_eq!(loaded.tags, vec!["ui"]);
        assert_eq!(loaded.assigned_to, vec!["u2"]);

        let mut ghost = card.clone();
        ghost.id = "ghost".to_string();
        assert!(matches!(
            repo.update_card(&ghost).await.unwrap_err(),
            FuzzyError::CardNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_board_persists_in_file_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(FileStorage::new(temp_dir.path()));
        let repo = BoardRepository::new(Database::open(storage).await.unwrap());

        let project = repo.create_project("Board", "", "u1").await.unwrap();
        let lanes = repo.list_lanes(&project.id).await.unwrap();
        repo.add_card(&project.id, &lanes[1].id, "Persisted")
            .await
            .unwrap();

        // A second repository over the same directory sees the same board
        let reopened = BoardRepository::new(
            Database::open(Arc::new(FileStorage::new(temp_dir.path())))
                .await
                .unwrap(),
        );
        let board = reopened.board(&project.id).await.unwrap();
        assert_eq!(board.lanes.len(), 3);
        assert_eq!(board.lanes[1].cards[0].title, "Persisted");
    }

    #[tokio::test]
    async fn test_cards_written_without_project_id_can_be_updated() {
        let storage = Arc::new(MemoryStorage::new());
        let repo = BoardRepository::new(Database::open(storage.clone()).await.unwrap());

        // Mobile clients store cards without a project_id field
        let body = match serde_json::json!({
            "title": "Created via Android",
            "description": "",
            "lane_id": "l1",
            "priority": "HIGH",
            "created_at": "2024-01-01T00:00:00Z"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let doc = Card::collection_path("p1").unwrap().doc("c1").unwrap();
        storage.put_document(&doc, &body).await.unwrap();

        let mut card = repo.get_card("p1", "c1").await.unwrap();
        assert_eq!(card.project_id, "p1");
        assert_eq!(repo.list_cards("p1").await.unwrap()[0].project_id, "p1");

        card.title = "Edited".to_string();
        repo.update_card(&card).await.unwrap();
        assert_eq!(repo.get_card("p1", "c1").await.unwrap().title, "Edited");
    }
}
