//! Orchestration around the split engine
//!
//! Loads the roster for a team and date (Holdsport attendance merged with
//! stored members and guests), runs the engine on a blocking worker, and
//! stores the result.

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::common::errors::{FormationError, Result};
use crate::common::traits::{AttendanceSource, FormationStore};
use crate::config::types::EngineConfig;
use crate::engine::{compute_team_split, Computation};
use crate::model::{Player, Position, TeamMetadata, TeamSplit, DEFAULT_SKILL};
use crate::render::{goalie_notice, render_team_split, RenderOptions};

/// Players registered for one practice
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub players: Vec<Player>,
    /// Attending users seen for the first time, stored with default skill
    pub new_members: Vec<String>,
    /// No practice activity was found; only guests are listed
    pub activity_missing: bool,
}

impl Roster {
    pub fn goalie_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_goalie()).count()
    }
}

/// Team formation service
pub struct FormationService<S, A> {
    store: Arc<S>,
    attendance: Arc<A>,
    engine: EngineConfig,
    utc_offset_hours: i64,
}

impl<S, A> FormationService<S, A>
where
    S: FormationStore + 'static,
    A: AttendanceSource + 'static,
{
    pub fn new(store: Arc<S>, attendance: Arc<A>, engine: EngineConfig) -> Self {
        Self {
            store,
            attendance,
            engine,
            utc_offset_hours: 2,
        }
    }

    /// Hours added to UTC when deciding today's practice date
    pub fn with_utc_offset(mut self, hours: i64) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Today's date at the configured offset
    pub fn practice_date(&self) -> NaiveDate {
        (Utc::now() + chrono::Duration::hours(self.utc_offset_hours)).date_naive()
    }

    /// Store team metadata (activity name, jersey colors)
    pub async fn register_team(&self, metadata: &TeamMetadata) -> Result<()> {
        self.store.upsert_team_metadata(metadata).await
    }

    /// Attending members plus the date's guests
    ///
    /// Attending users unknown to the store are saved as members with default
    /// skill and position.
    #[instrument(skip(self))]
    pub async fn load_roster(&self, team_id: i64, date: NaiveDate) -> Result<Roster> {
        let metadata = self
            .store
            .load_team_metadata(team_id)
            .await?
            .ok_or(FormationError::TeamNotFound(team_id))?;

        let mut roster = Roster::default();

        match self
            .attendance
            .find_activity(team_id, date, &metadata.activity_name)
            .await?
        {
            Some(activity_id) => {
                for user in self.attendance.attending_users(activity_id).await? {
                    match self.store.load_member(team_id, user.user_id).await? {
                        Some(member) => roster.players.push(member),
                        None => {
                            let member = Player::member(
                                user.user_id,
                                user.name.clone(),
                                DEFAULT_SKILL,
                                Position::default(),
                            )?;
                            self.store.upsert_member(team_id, &member).await?;
                            info!(name = %user.name, "Registered new member");
                            roster.new_members.push(user.name);
                            roster.players.push(member);
                        }
                    }
                }
            }
            None => {
                warn!(
                    activity = %metadata.activity_name,
                    %date,
                    "No practice activity found, using guests only"
                );
                roster.activity_missing = true;
            }
        }

        roster
            .players
            .extend(self.store.load_guests(team_id, date).await?);
        Ok(roster)
    }

    /// Compute and store the split for a date with fresh randomness
    pub async fn create_teams(&self, team_id: i64, date: NaiveDate) -> Result<Option<TeamSplit>> {
        self.create_teams_with_rng(team_id, date, StdRng::from_entropy())
            .await
    }

    /// Compute and store the split for a date
    ///
    /// Returns `Ok(None)` when nobody is registered; nothing is stored then.
    #[instrument(skip(self, rng))]
    pub async fn create_teams_with_rng<R>(
        &self,
        team_id: i64,
        date: NaiveDate,
        mut rng: R,
    ) -> Result<Option<TeamSplit>>
    where
        R: Rng + Send + 'static,
    {
        let roster = self.load_roster(team_id, date).await?;
        let engine = self.engine.clone();
        let players = roster.players;

        let computed = tokio::task::spawn_blocking(move || {
            compute_team_split(&players, date, &engine, &mut rng)
        })
        .await?;

        let Computation {
            split,
            candidate_count,
            evaluated,
            truncated,
        } = match computed {
            Ok(computation) => computation,
            Err(FormationError::NoPlayers) => {
                info!(team_id, %date, "No players registered, nothing stored");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if truncated {
            warn!(candidate_count, evaluated, "Search stopped at the candidate cap");
        }

        self.store.upsert_team_split(team_id, &split).await?;
        info!(
            team_id,
            %date,
            metrics = %split.metrics,
            candidate_count,
            evaluated,
            "Stored team split"
        );
        Ok(Some(split))
    }

    /// Start a computation in the background and return immediately
    pub fn trigger_create_teams(
        self: &Arc<Self>,
        team_id: i64,
        date: NaiveDate,
    ) -> JoinHandle<Result<Option<TeamSplit>>> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.create_teams(team_id, date).await })
    }

    /// Render a split with the team's jersey labels
    pub async fn render_split(
        &self,
        team_id: i64,
        split: &TeamSplit,
        options: RenderOptions,
    ) -> Result<String> {
        let metadata = self
            .store
            .load_team_metadata(team_id)
            .await?
            .ok_or(FormationError::TeamNotFound(team_id))?;
        Ok(render_team_split(split, Some(&metadata), options))
    }

    /// Rendered split for a date, `None` if nothing was computed yet
    pub async fn get_teams(
        &self,
        team_id: i64,
        date: NaiveDate,
        options: RenderOptions,
    ) -> Result<Option<String>> {
        match self.store.load_team_split(team_id, date).await? {
            Some(split) => Ok(Some(self.render_split(team_id, &split, options).await?)),
            None => {
                if self.store.load_team_metadata(team_id).await?.is_none() {
                    return Err(FormationError::TeamNotFound(team_id));
                }
                Ok(None)
            }
        }
    }

    /// Goalie registration notice for a date
    pub async fn goalie_status(&self, team_id: i64, date: NaiveDate) -> Result<&'static str> {
        let roster = self.load_roster(team_id, date).await?;
        Ok(goalie_notice(roster.goalie_count()))
    }

    pub async fn add_guest(&self, team_id: i64, date: NaiveDate, guest: &Player) -> Result<()> {
        self.store.add_guest(team_id, date, guest).await
    }

    pub async fn remove_guest(&self, team_id: i64, date: NaiveDate, name: &str) -> Result<bool> {
        self.store.remove_guest(team_id, date, name).await
    }

    /// Change a stored member's skill and position
    pub async fn update_member(
        &self,
        team_id: i64,
        member_id: u64,
        skill: i64,
        position: Position,
    ) -> Result<Player> {
        let member = self
            .store
            .load_member(team_id, member_id)
            .await?
            .ok_or(FormationError::MemberNotFound(member_id))?;
        let updated = member.with_profile(skill, position);
        self.store.upsert_member(team_id, &updated).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::traits::MockAttendanceSource;
    use crate::common::types::AttendingUser;
    use crate::storage::InMemoryFormationStore;
    use mockall::predicate::eq;

    const TEAM: i64 = 4242;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    async fn store_with_team() -> Arc<InMemoryFormationStore> {
        let store = Arc::new(InMemoryFormationStore::new());
        store
            .upsert_team_metadata(
                &TeamMetadata::new(TEAM, "Falcons")
                    .with_activity("Practice")
                    .with_jerseys("Red", "Black"),
            )
            .await
            .unwrap();
        store
    }

    fn attendance(users: Vec<AttendingUser>) -> MockAttendanceSource {
        let mut mock = MockAttendanceSource::new();
        mock.expect_find_activity()
            .withf(|team_id, day, activity| {
                *team_id == TEAM && *day == date() && activity == "Practice"
            })
            .returning(|_, _, _| Ok(Some(99)));
        mock.expect_attending_users()
            .with(eq(99))
            .returning(move |_| Ok(users.clone()));
        mock
    }

    #[tokio::test]
    async fn test_roster_syncs_new_members() {
        let store = store_with_team().await;
        store
            .upsert_member(TEAM, &Player::member(1, "KNOWN", 500, Position::Goalie).unwrap())
            .await
            .unwrap();
        store
            .add_guest(TEAM, date(), &Player::guest("VISITOR", 200, Position::Defense).unwrap())
            .await
            .unwrap();

        let mock = attendance(vec![AttendingUser::new(1, "KNOWN"), AttendingUser::new(2, "NEWBIE")]);
        let service = FormationService::new(store.clone(), Arc::new(mock), EngineConfig::default());

        let roster = service.load_roster(TEAM, date()).await.unwrap();
        let names: Vec<&str> = roster.players.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["KNOWN", "NEWBIE", "VISITOR"]);
        assert_eq!(roster.new_members, vec!["NEWBIE".to_string()]);
        assert_eq!(roster.goalie_count(), 1);

        let newbie = store.load_member(TEAM, 2).await.unwrap().unwrap();
        assert_eq!(newbie.skill(), DEFAULT_SKILL);
        assert_eq!(newbie.position(), Position::Forward);
    }

    #[tokio::test]
    async fn test_create_teams_stores_split() {
        let store = store_with_team().await;
        let mock = attendance(vec![
            AttendingUser::new(1, "ANNA"),
            AttendingUser::new(2, "BEN"),
            AttendingUser::new(3, "CARL"),
            AttendingUser::new(4, "DANIEL MIZSAK"),
        ]);
        let engine = EngineConfig {
            anchor_player: Some("DANIEL MIZSAK".to_string()),
            ..EngineConfig::default()
        };
        let service = FormationService::new(store.clone(), Arc::new(mock), engine);

        let split = service
            .create_teams_with_rng(TEAM, date(), StdRng::seed_from_u64(5))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(split.team_of("DANIEL MIZSAK"), Some(1));
        assert!(split.metrics.is_balanced());
        assert_eq!(store.load_team_split(TEAM, date()).await.unwrap(), Some(split.clone()));

        let text = service
            .get_teams(TEAM, date(), RenderOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert!(text.starts_with("Date: 2024-03-14"));
        assert!(text.contains("Team Red: (2)"));

        let fresh = service
            .render_split(TEAM, &split, RenderOptions::default())
            .await
            .unwrap();
        assert_eq!(fresh, text);
        assert!(fresh.contains("Team Black: (2)"));
    }

    #[tokio::test]
    async fn test_empty_roster_stores_nothing() {
        let store = store_with_team().await;
        let mut mock = MockAttendanceSource::new();
        mock.expect_find_activity().returning(|_, _, _| Ok(None));
        mock.expect_attending_users().never();
        let service = FormationService::new(store.clone(), Arc::new(mock), EngineConfig::default());

        let result = service.create_teams(TEAM, date()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(store.split_count().await, 0);
        assert_eq!(
            service.get_teams(TEAM, date(), RenderOptions::default()).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_unknown_team() {
        let store = Arc::new(InMemoryFormationStore::new());
        let service = FormationService::new(
            store,
            Arc::new(MockAttendanceSource::new()),
            EngineConfig::default(),
        );

        let err = service.create_teams(1, date()).await.unwrap_err();
        assert!(matches!(err, FormationError::TeamNotFound(1)));
    }

    #[tokio::test]
    async fn test_goalie_status_and_member_update() {
        let store = store_with_team().await;
        let mock = attendance(vec![AttendingUser::new(8, "GOALIE ONE")]);
        let service = FormationService::new(store.clone(), Arc::new(mock), EngineConfig::default());

        assert!(service.goalie_status(TEAM, date()).await.unwrap().starts_with("Oh-oh!"));

        let updated = service
            .update_member(TEAM, 8, 450, Position::Goalie)
            .await
            .unwrap();
        assert_eq!(updated.member_id(), Some(8));
        assert!(service
            .goalie_status(TEAM, date())
            .await
            .unwrap()
            .contains("Only 1 goalie"));

        let err = service
            .update_member(TEAM, 404, 300, Position::Forward)
            .await
            .unwrap_err();
        assert!(matches!(err, FormationError::MemberNotFound(404)));
    }

    #[tokio::test]
    async fn test_trigger_runs_in_background() {
        let store = store_with_team().await;
        let mock = attendance(vec![AttendingUser::new(1, "A"), AttendingUser::new(2, "B")]);
        let service = Arc::new(FormationService::new(
            store.clone(),
            Arc::new(mock),
            EngineConfig::default(),
        ));

        let handle = service.trigger_create_teams(TEAM, date());
        let split = handle.await.unwrap().unwrap().unwrap();
        assert_eq!(split.player_count(), 2);
        assert_eq!(store.split_count().await, 1);
    }
}
