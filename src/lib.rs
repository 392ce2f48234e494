//! Falcon Formation Library
//!
//! Splits the players registered for an ice hockey practice into two
//! balanced teams, using Holdsport for attendance and Postgres for members,
//! guests and computed splits.

pub mod common {
    pub mod errors;
    pub mod traits;
    pub mod types;
}

pub mod config {
    pub mod loader;
    pub mod types;
}

pub mod engine;
pub mod holdsport;
pub mod model;
pub mod render;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use common::errors::{FormationError, Result, ValidationError};
pub use common::traits::{AttendanceSource, FormationStore};
pub use common::types::AttendingUser;
pub use config::types::AppConfig;
pub use engine::{compute_team_split, BestSplitSelector, Computation, Partitions};
pub use holdsport::HoldsportRestClient;
pub use model::{ImbalanceMetrics, Player, PlayerKind, Position, TeamMetadata, TeamSplit};
pub use render::{render_team_split, RenderOptions};
pub use service::{FormationService, Roster};
pub use storage::{InMemoryFormationStore, PgFormationStore};
