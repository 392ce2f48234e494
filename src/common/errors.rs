//! Error types for the application

use thiserror::Error;

/// Result type alias using our FormationError
pub type Result<T> = std::result::Result<T, FormationError>;

/// Rejected player data
///
/// Raised only while constructing or deserializing a player. An out-of-range
/// skill is never a validation error; it is clamped instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Player name is empty
    #[error("Invalid player name: player name must not be empty")]
    EmptyName,

    /// Position is not one of Defense, Forward, Goalie
    #[error("Invalid position: {position} for player: {name} (valid positions: Defense, Forward, Goalie)")]
    UnknownPosition { name: String, position: String },
}

/// Main error type for team formation operations
#[derive(Error, Debug)]
pub enum FormationError {
    /// Invalid player data
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Roster is empty, there is nothing to split
    #[error("No players registered, cannot compute a team split")]
    NoPlayers,

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Member operation given a guest, or the reverse
    #[error("Wrong player kind: {0}")]
    WrongPlayerKind(String),

    /// Team metadata missing from the store
    #[error("Team not found: {0}")]
    TeamNotFound(i64),

    /// Member missing from the store
    #[error("Member not found: {0}")]
    MemberNotFound(u64),

    /// Background computation failed to complete
    #[error("Background task failed: {0}")]
    Task(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for FormationError {
    fn from(err: tokio::task::JoinError) -> Self {
        FormationError::Task(err.to_string())
    }
}

impl FormationError {
    /// True when the error only means there was nothing to compute
    pub fn is_no_players(&self) -> bool {
        matches!(self, FormationError::NoPlayers)
    }
}
