//! Collaborator traits for the service layer

use async_trait::async_trait;
use chrono::NaiveDate;

use super::errors::Result;
use super::types::AttendingUser;
use crate::model::{Player, TeamMetadata, TeamSplit};

/// Source of practice attendance (Holdsport in production)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceSource: Send + Sync {
    /// Id of the activity named `activity_name` on `date`, if there is one
    async fn find_activity(
        &self,
        team_id: i64,
        date: NaiveDate,
        activity_name: &str,
    ) -> Result<Option<u64>>;

    /// Users registered as attending the activity
    async fn attending_users(&self, activity_id: u64) -> Result<Vec<AttendingUser>>;
}

/// Persistence for team metadata, members, guests and computed splits
///
/// Splits are keyed by `(team_id, date)`. Storing a split replaces any earlier
/// one for the same key; the last write wins.
#[async_trait]
pub trait FormationStore: Send + Sync {
    async fn upsert_team_metadata(&self, metadata: &TeamMetadata) -> Result<()>;

    async fn load_team_metadata(&self, team_id: i64) -> Result<Option<TeamMetadata>>;

    async fn load_member(&self, team_id: i64, member_id: u64) -> Result<Option<Player>>;

    /// Insert or replace a member; non-members are rejected
    async fn upsert_member(&self, team_id: i64, member: &Player) -> Result<()>;

    /// All members of a team, sorted by name
    async fn load_members(&self, team_id: i64) -> Result<Vec<Player>>;

    /// Insert or replace a guest for one date, keyed by name
    async fn add_guest(&self, team_id: i64, date: NaiveDate, guest: &Player) -> Result<()>;

    /// Returns false when no guest had that name
    async fn remove_guest(&self, team_id: i64, date: NaiveDate, name: &str) -> Result<bool>;

    /// Guests for one date, sorted by name
    async fn load_guests(&self, team_id: i64, date: NaiveDate) -> Result<Vec<Player>>;

    async fn upsert_team_split(&self, team_id: i64, split: &TeamSplit) -> Result<()>;

    async fn load_team_split(&self, team_id: i64, date: NaiveDate) -> Result<Option<TeamSplit>>;
}
