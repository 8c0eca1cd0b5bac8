use crate::domain::{card::Card, lane::Lane};
use serde::{Deserialize, Serialize};

/// A lane together with the cards currently in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneView {
    pub lane: Lane,
    pub cards: Vec<Card>,
}

/// Read model of a project board: lanes in display order, each with its cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub project_id: String,
    pub lanes: Vec<LaneView>,
    /// Cards whose `lane_id` matches none of the project's lanes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned_cards: Vec<Card>,
}

impl Board {
    /// Builds a board from the project's lanes and cards.
    ///
    /// Lanes are ordered by `order_index`; lanes sharing an index keep the
    /// order they were given in. Cards keep their input order within a lane.
    pub fn assemble(project_id: String, mut lanes: Vec<Lane>, cards: Vec<Card>) -> Self {
        lanes.sort_by_key(|lane| lane.order_index);

        let mut views: Vec<LaneView> = lanes
            .into_iter()
            .map(|lane| LaneView {
                lane,
                cards: Vec::new(),
            })
            .collect();
        let mut orphaned_cards = Vec::new();

        for card in cards {
            match views.iter_mut().find(|view| view.lane.id == card.lane_id) {
                Some(view) => view.cards.push(card),
                None => orphaned_cards.push(card),
            }
        }

        Self {
            project_id,
            lanes: views,
            orphaned_cards,
        }
    }

    /// Gets a lane view by lane id
    pub fn lane(&self, lane_id: &str) -> Option<&LaneView> {
        self.lanes.iter().find(|view| view.lane.id == lane_id)
    }

    /// Number of cards placed in lanes
    pub fn card_count(&self) -> usize {
        self.lanes.iter().map(|view| view.cards.len()).sum()
    }
}
