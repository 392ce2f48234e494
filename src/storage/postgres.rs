//! Postgres-backed store

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use std::time::Duration;
use tracing::{info, instrument};

use crate::common::errors::{FormationError, Result};
use crate::common::traits::FormationStore;
use crate::config::types::DatabaseConfig;
use crate::model::{Player, PlayerRecord, TeamMetadata, TeamSplit};

const SCHEMA: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS team_metadata (
        team_id BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        activity_name TEXT NOT NULL DEFAULT '',
        jersey_color_1 TEXT NOT NULL DEFAULT '',
        jersey_color_2 TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS members (
        team_id BIGINT NOT NULL,
        member_id BIGINT NOT NULL,
        name TEXT NOT NULL,
        skill INTEGER NOT NULL,
        position TEXT NOT NULL,
        PRIMARY KEY (team_id, member_id)
    )",
    "CREATE TABLE IF NOT EXISTS guests (
        team_id BIGINT NOT NULL,
        date DATE NOT NULL,
        name TEXT NOT NULL,
        skill INTEGER NOT NULL,
        position TEXT NOT NULL,
        PRIMARY KEY (team_id, date, name)
    )",
    "CREATE TABLE IF NOT EXISTS team_splits (
        team_id BIGINT NOT NULL,
        date DATE NOT NULL,
        payload JSONB NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (team_id, date)
    )",
];

#[derive(Debug, sqlx::FromRow)]
struct TeamMetadataRow {
    team_id: i64,
    name: String,
    activity_name: String,
    jersey_color_1: String,
    jersey_color_2: String,
}

impl From<TeamMetadataRow> for TeamMetadata {
    fn from(row: TeamMetadataRow) -> Self {
        Self {
            team_id: row.team_id,
            name: row.name,
            activity_name: row.activity_name,
            jersey_color_1: row.jersey_color_1,
            jersey_color_2: row.jersey_color_2,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlayerRow {
    member_id: Option<i64>,
    name: String,
    skill: i32,
    position: String,
}

impl TryFrom<PlayerRow> for Player {
    type Error = FormationError;

    fn try_from(row: PlayerRow) -> Result<Self> {
        let member_id = row
            .member_id
            .map(|id| {
                u64::try_from(id)
                    .map_err(|_| FormationError::Internal(format!("Negative member id: {}", id)))
            })
            .transpose()?;
        Ok(Player::try_from(PlayerRecord {
            member_id,
            name: row.name,
            skill: i64::from(row.skill),
            position: row.position,
        })?)
    }
}

fn db_member_id(member_id: u64) -> Result<i64> {
    i64::try_from(member_id)
        .map_err(|_| FormationError::Internal(format!("Member id out of range: {}", member_id)))
}

/// Store on a Postgres connection pool
#[derive(Debug, Clone)]
pub struct PgFormationStore {
    pool: PgPool,
}

impl PgFormationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using the database configuration and create missing tables
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .connect(&config.url)
            .await?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Create tables that do not exist yet
    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FormationStore for PgFormationStore {
    #[instrument(skip(self))]
    async fn upsert_team_metadata(&self, metadata: &TeamMetadata) -> Result<()> {
        sqlx::query(
            "INSERT INTO team_metadata (team_id, name, activity_name, jersey_color_1, jersey_color_2)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (team_id) DO UPDATE SET
                name = EXCLUDED.name,
                activity_name = EXCLUDED.activity_name,
                jersey_color_1 = EXCLUDED.jersey_color_1,
                jersey_color_2 = EXCLUDED.jersey_color_2",
        )
        .bind(metadata.team_id)
        .bind(&metadata.name)
        .bind(&metadata.activity_name)
        .bind(&metadata.jersey_color_1)
        .bind(&metadata.jersey_color_2)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn load_team_metadata(&self, team_id: i64) -> Result<Option<TeamMetadata>> {
        let row = sqlx::query_as::<_, TeamMetadataRow>(
            "SELECT team_id, name, activity_name, jersey_color_1, jersey_color_2
             FROM team_metadata WHERE team_id = $1",
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(TeamMetadata::from))
    }

    async fn load_member(&self, team_id: i64, member_id: u64) -> Result<Option<Player>> {
        let row = sqlx::query_as::<_, PlayerRow>(
            "SELECT member_id, name, skill, position FROM members
             WHERE team_id = $1 AND member_id = $2",
        )
        .bind(team_id)
        .bind(db_member_id(member_id)?)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Player::try_from).transpose()
    }

    #[instrument(skip(self, member), fields(name = member.name()))]
    async fn upsert_member(&self, team_id: i64, member: &Player) -> Result<()> {
        let member_id = member.member_id().ok_or_else(|| {
            FormationError::WrongPlayerKind(format!("{} is a guest, not a member", member.name()))
        })?;
        sqlx::query(
            "INSERT INTO members (team_id, member_id, name, skill, position)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (team_id, member_id) DO UPDATE SET
                name = EXCLUDED.name,
                skill = EXCLUDED.skill,
                position = EXCLUDED.position",
        )
        .bind(team_id)
        .bind(db_member_id(member_id)?)
        .bind(member.name())
        .bind(member.skill())
        .bind(member.position().as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn load_members(&self, team_id: i64) -> Result<Vec<Player>> {
        sqlx::query_as::<_, PlayerRow>(
            "SELECT member_id, name, skill, position FROM members
             WHERE team_id = $1 ORDER BY name",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Player::try_from)
        .collect()
    }

    #[instrument(skip(self, guest), fields(name = guest.name()))]
    async fn add_guest(&self, team_id: i64, date: NaiveDate, guest: &Player) -> Result<()> {
        if !guest.is_guest() {
            return Err(FormationError::WrongPlayerKind(format!(
                "{} is a member, not a guest",
                guest.name()
            )));
        }
        sqlx::query(
            "INSERT INTO guests (team_id, date, name, skill, position)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (team_id, date, name) DO UPDATE SET
                skill = EXCLUDED.skill,
                position = EXCLUDED.position",
        )
        .bind(team_id)
        .bind(date)
        .bind(guest.name())
        .bind(guest.skill())
        .bind(guest.position().as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_guest(&self, team_id: i64, date: NaiveDate, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM guests WHERE team_id = $1 AND date = $2 AND name = $3")
            .bind(team_id)
            .bind(date)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn load_guests(&self, team_id: i64, date: NaiveDate) -> Result<Vec<Player>> {
        sqlx::query_as::<_, PlayerRow>(
            "SELECT NULL::BIGINT AS member_id, name, skill, position FROM guests
             WHERE team_id = $1 AND date = $2 ORDER BY name",
        )
        .bind(team_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Player::try_from)
        .collect()
    }

    #[instrument(skip(self, split), fields(date = %split.date))]
    async fn upsert_team_split(&self, team_id: i64, split: &TeamSplit) -> Result<()> {
        sqlx::query(
            "INSERT INTO team_splits (team_id, date, payload, updated_at)
             VALUES ($1, $2, $3, now())
             ON CONFLICT (team_id, date) DO UPDATE SET
                payload = EXCLUDED.payload,
                updated_at = EXCLUDED.updated_at",
        )
        .bind(team_id)
        .bind(split.date)
        .bind(Json(split))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn load_team_split(&self, team_id: i64, date: NaiveDate) -> Result<Option<TeamSplit>> {
        let payload = sqlx::query_scalar::<_, Json<TeamSplit>>(
            "SELECT payload FROM team_splits WHERE team_id = $1 AND date = $2",
        )
        .bind(team_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(payload.map(|Json(split)| split))
    }
}
