pub mod board;
pub mod card;
pub mod document;
pub mod lane;
pub mod project;
pub mod sorting;

pub use board::{Board, LaneView};
pub use card::{Card, Priority};
pub use document::Document;
pub use lane::Lane;
pub use project::Project;
pub use sorting::{sort_cards, SortField, SortOrder};
