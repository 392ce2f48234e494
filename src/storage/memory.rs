//! In-memory store, used by the offline CLI path and tests

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::common::errors::{FormationError, Result};
use crate::common::traits::FormationStore;
use crate::model::{Player, TeamMetadata, TeamSplit};

#[derive(Debug, Default)]
struct StoreState {
    teams: HashMap<i64, TeamMetadata>,
    members: HashMap<i64, HashMap<u64, Player>>,
    guests: HashMap<(i64, NaiveDate), BTreeMap<String, Player>>,
    splits: HashMap<(i64, NaiveDate), TeamSplit>,
}

/// Store backed by hash maps behind a single lock
#[derive(Debug, Default)]
pub struct InMemoryFormationStore {
    state: RwLock<StoreState>,
}

impl InMemoryFormationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored splits across all teams
    pub async fn split_count(&self) -> usize {
        self.state.read().await.splits.len()
    }
}

#[async_trait]
impl FormationStore for InMemoryFormationStore {
    async fn upsert_team_metadata(&self, metadata: &TeamMetadata) -> Result<()> {
        self.state
            .write()
            .await
            .teams
            .insert(metadata.team_id, metadata.clone());
        Ok(())
    }

    async fn load_team_metadata(&self, team_id: i64) -> Result<Option<TeamMetadata>> {
        Ok(self.state.read().await.teams.get(&team_id).cloned())
    }

    async fn load_member(&self, team_id: i64, member_id: u64) -> Result<Option<Player>> {
        Ok(self
            .state
            .read()
            .await
            .members
            .get(&team_id)
            .and_then(|members| members.get(&member_id))
            .cloned())
    }

    async fn upsert_member(&self, team_id: i64, member: &Player) -> Result<()> {
        let member_id = member.member_id().ok_or_else(|| {
            FormationError::WrongPlayerKind(format!("{} is a guest, not a member", member.name()))
        })?;
        self.state
            .write()
            .await
            .members
            .entry(team_id)
            .or_default()
            .insert(member_id, member.clone());
        Ok(())
    }

    async fn load_members(&self, team_id: i64) -> Result<Vec<Player>> {
        let state = self.state.read().await;
        let mut members: Vec<Player> = state
            .members
            .get(&team_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        members.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(members)
    }

    async fn add_guest(&self, team_id: i64, date: NaiveDate, guest: &Player) -> Result<()> {
        if !guest.is_guest() {
            return Err(FormationError::WrongPlayerKind(format!(
                "{} is a member, not a guest",
                guest.name()
            )));
        }
        self.state
            .write()
            .await
            .guests
            .entry((team_id, date))
            .or_default()
            .insert(guest.name().to_string(), guest.clone());
        Ok(())
    }

    async fn remove_guest(&self, team_id: i64, date: NaiveDate, name: &str) -> Result<bool> {
        Ok(self
            .state
            .write()
            .await
            .guests
            .get_mut(&(team_id, date))
            .and_then(|guests| guests.remove(name))
            .is_some())
    }

    async fn load_guests(&self, team_id: i64, date: NaiveDate) -> Result<Vec<Player>> {
        Ok(self
            .state
            .read()
            .await
            .guests
            .get(&(team_id, date))
            .map(|guests| guests.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn upsert_team_split(&self, team_id: i64, split: &TeamSplit) -> Result<()> {
        self.state
            .write()
            .await
            .splits
            .insert((team_id, split.date), split.clone());
        Ok(())
    }

    async fn load_team_split(&self, team_id: i64, date: NaiveDate) -> Result<Option<TeamSplit>> {
        Ok(self.state.read().await.splits.get(&(team_id, date)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImbalanceMetrics, Position};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    #[tokio::test]
    async fn test_split_upsert_replaces() {
        let store = InMemoryFormationStore::new();
        let first = TeamSplit {
            date: date(),
            team_1: vec![Player::guest("A", 300, Position::Forward).unwrap()],
            team_2: vec![],
            metrics: ImbalanceMetrics::new(0, 0, 300, 0),
        };
        let second = TeamSplit {
            metrics: ImbalanceMetrics::default(),
            team_1: vec![],
            ..first.clone()
        };

        store.upsert_team_split(1, &first).await.unwrap();
        store.upsert_team_split(1, &second).await.unwrap();

        assert_eq!(store.load_team_split(1, date()).await.unwrap(), Some(second));
        assert_eq!(store.load_team_split(2, date()).await.unwrap(), None);
        assert_eq!(store.split_count().await, 1);
    }

    #[tokio::test]
    async fn test_members_and_guests_are_kept_apart() {
        let store = InMemoryFormationStore::new();
        let member = Player::member(11, "MEMBER", 400, Position::Defense).unwrap();
        let guest = Player::guest("GUEST", 200, Position::Goalie).unwrap();

        store.upsert_member(1, &member).await.unwrap();
        store.add_guest(1, date(), &guest).await.unwrap();

        assert!(matches!(
            store.upsert_member(1, &guest).await,
            Err(FormationError::WrongPlayerKind(_))
        ));
        assert!(matches!(
            store.add_guest(1, date(), &member).await,
            Err(FormationError::WrongPlayerKind(_))
        ));

        assert_eq!(store.load_member(1, 11).await.unwrap(), Some(member));
        assert_eq!(store.load_guests(1, date()).await.unwrap(), vec![guest]);
        assert!(store.remove_guest(1, date(), "GUEST").await.unwrap());
        assert!(!store.remove_guest(1, date(), "GUEST").await.unwrap());
        assert!(store.load_guests(1, date()).await.unwrap().is_empty());
    }
}
