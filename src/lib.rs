//! # Fuzzy-Go Core
//!
//! Domain models, document storage and backend bootstrap for the Fuzzy-Go
//! kanban board.
//!
//! Projects, lanes and cards are plain records that serialize both to a JSON
//! wire format (with `id`) and to document bodies (without `id`, which is
//! carried by the document reference). Storage backends implement the
//! [`Storage`] trait; [`Database`] layers typed access on top and
//! [`BoardRepository`] provides the board operations.

pub mod client;
pub mod config;
pub mod database;
pub mod domain;
pub mod error;
pub mod logging;
pub mod repository;
pub mod startup;
pub mod storage;

// Re-export commonly used types
pub use client::{App, AppOptions, Credentials};
pub use config::ServerConfig;
pub use database::Database;
pub use domain::{
    board::{Board, LaneView},
    card::{Card, Priority},
    lane::Lane,
    project::Project,
};
pub use error::{FuzzyError, Result};
pub use repository::BoardRepository;
pub use startup::StartupReport;
pub use storage::Storage;
