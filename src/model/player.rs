//! Roster entries: members and guests

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::errors::ValidationError;

/// Playing position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Defense,
    #[default]
    Forward,
    Goalie,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Defense, Position::Forward, Position::Goalie];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Defense => "Defense",
            Position::Forward => "Forward",
            Position::Goalie => "Goalie",
        }
    }

    /// Emoji shown next to the player in rendered team lists
    pub fn emoji(&self) -> &'static str {
        match self {
            Position::Defense => "⏮️",
            Position::Forward => "⏩",
            Position::Goalie => "⏹️",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Named skill levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillLevel {
    Minimum,
    WellBelowAverage,
    BelowAverage,
    Average,
    AboveAverage,
    WellAboveAverage,
    Maximum,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 7] = [
        SkillLevel::Minimum,
        SkillLevel::WellBelowAverage,
        SkillLevel::BelowAverage,
        SkillLevel::Average,
        SkillLevel::AboveAverage,
        SkillLevel::WellAboveAverage,
        SkillLevel::Maximum,
    ];

    pub fn score(&self) -> i32 {
        match self {
            SkillLevel::Minimum => -500,
            SkillLevel::WellBelowAverage => 100,
            SkillLevel::BelowAverage => 200,
            SkillLevel::Average => 300,
            SkillLevel::AboveAverage => 400,
            SkillLevel::WellAboveAverage => 500,
            SkillLevel::Maximum => 1000,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SkillLevel::Minimum => "Minimum",
            SkillLevel::WellBelowAverage => "Well below average",
            SkillLevel::BelowAverage => "Below average",
            SkillLevel::Average => "Average",
            SkillLevel::AboveAverage => "Above average",
            SkillLevel::WellAboveAverage => "Well above average",
            SkillLevel::Maximum => "Maximum",
        }
    }

    /// Look up the named level for an exact score
    pub fn from_score(score: i32) -> Option<SkillLevel> {
        SkillLevel::ALL.into_iter().find(|level| level.score() == score)
    }
}

/// Lowest accepted skill score
pub const SKILL_MIN: i32 = -500;
/// Highest accepted skill score
pub const SKILL_MAX: i32 = 1000;
/// Skill given to players without stored data
pub const DEFAULT_SKILL: i32 = 300;

/// Pull a score of any size into `[SKILL_MIN, SKILL_MAX]`
pub fn clamp_skill(skill: i64) -> i32 {
    let clamped = skill.clamp(i64::from(SKILL_MIN), i64::from(SKILL_MAX));
    i32::try_from(clamped).unwrap_or(DEFAULT_SKILL)
}

/// Member or guest payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    /// Registered Holdsport user, synced across dates
    Member { id: u64 },
    /// One-off attendee, scoped to a single date
    Guest,
}

/// Immutable roster entry
///
/// Skill is clamped into `[SKILL_MIN, SKILL_MAX]` on construction; an
/// out-of-range score is pulled to the nearest bound, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PlayerRecord", into = "PlayerRecord")]
pub struct Player {
    name: String,
    skill: i32,
    position: Position,
    kind: PlayerKind,
}

impl Player {
    /// Create a registered member
    pub fn member(
        id: u64,
        name: impl Into<String>,
        skill: impl Into<i64>,
        position: Position,
    ) -> Result<Self, ValidationError> {
        Self::build(name.into(), skill.into(), position, PlayerKind::Member { id })
    }

    /// Create a guest for a single date
    pub fn guest(
        name: impl Into<String>,
        skill: impl Into<i64>,
        position: Position,
    ) -> Result<Self, ValidationError> {
        Self::build(name.into(), skill.into(), position, PlayerKind::Guest)
    }

    fn build(
        name: String,
        skill: i64,
        position: Position,
        kind: PlayerKind,
    ) -> Result<Self, ValidationError> {
        let player = Self {
            name,
            skill: clamp_skill(skill),
            position,
            kind,
        };
        player.validate()?;
        Ok(player)
    }

    /// Check invariants that cannot be repaired silently
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skill(&self) -> i32 {
        self.skill
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    /// External Holdsport id, members only
    pub fn member_id(&self) -> Option<u64> {
        match self.kind {
            PlayerKind::Member { id } => Some(id),
            PlayerKind::Guest => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self.kind, PlayerKind::Guest)
    }

    pub fn is_goalie(&self) -> bool {
        self.position == Position::Goalie
    }

    pub fn is_defense(&self) -> bool {
        self.position == Position::Defense
    }

    /// Copy of this player with new skill and position, identity unchanged
    pub fn with_profile(&self, skill: impl Into<i64>, position: Position) -> Self {
        Self {
            name: self.name.clone(),
            skill: clamp_skill(skill.into()),
            position,
            kind: self.kind.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  💪{}  {}", self.name, self.skill, self.position.emoji())?;
        if self.is_guest() {
            write!(f, "  👤")?;
        }
        Ok(())
    }
}

/// Wire form of a player
///
/// Position stays a plain string here so that an unknown value surfaces as a
/// `ValidationError` rather than a generic serde error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<u64>,
    pub name: String,
    #[serde(default = "default_skill")]
    pub skill: i64,
    #[serde(default = "default_position")]
    pub position: String,
}

fn default_skill() -> i64 {
    i64::from(DEFAULT_SKILL)
}

fn default_position() -> String {
    Position::Forward.as_str().to_string()
}

impl TryFrom<PlayerRecord> for Player {
    type Error = ValidationError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        if record.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let position = record
            .position
            .parse::<Position>()
            .map_err(|position| ValidationError::UnknownPosition {
                name: record.name.clone(),
                position,
            })?;
        let kind = match record.member_id {
            Some(id) => PlayerKind::Member { id },
            None => PlayerKind::Guest,
        };
        Player::build(record.name, record.skill, position, kind)
    }
}

impl From<Player> for PlayerRecord {
    fn from(player: Player) -> Self {
        Self {
            member_id: player.member_id(),
            name: player.name,
            skill: i64::from(player.skill),
            position: player.position.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_is_clamped_not_rejected() {
        let high = Player::guest("HIGH", 5000, Position::Forward).unwrap();
        assert_eq!(high.skill(), SKILL_MAX);

        let low = Player::member(1, "LOW", -9000, Position::Defense).unwrap();
        assert_eq!(low.skill(), SKILL_MIN);

        let edge = Player::guest("EDGE", SKILL_MIN, Position::Goalie).unwrap();
        assert_eq!(edge.skill(), SKILL_MIN);
    }

    #[test]
    fn test_json_skill_beyond_i32_is_clamped() {
        let big = Player::from_json(r#"{"name": "BIG", "skill": 5000000000, "position": "Forward"}"#)
            .unwrap();
        assert_eq!(big.skill(), SKILL_MAX);

        let small =
            Player::from_json(r#"{"name": "SMALL", "skill": -5000000000, "position": "Forward"}"#)
                .unwrap();
        assert_eq!(small.skill(), SKILL_MIN);

        let wide = Player::guest("WIDE", 5_000_000_000_i64, Position::Goalie).unwrap();
        assert_eq!(wide.skill(), SKILL_MAX);
        assert_eq!(wide.with_profile(i64::MIN, Position::Defense).skill(), SKILL_MIN);
        assert_eq!(clamp_skill(450), 450);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = Player::guest("", 300, Position::Forward).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);

        let err = Player::member(7, "", 300, Position::Forward).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        let err = Player::from_json(r#"{"name": "X", "skill": 300, "position": "Winger"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Winger"));

        let record = PlayerRecord {
            member_id: None,
            name: "X".to_string(),
            skill: 300,
            position: "goalie".to_string(),
        };
        assert_eq!(
            Player::try_from(record).unwrap_err(),
            ValidationError::UnknownPosition {
                name: "X".to_string(),
                position: "goalie".to_string(),
            }
        );
    }

    #[test]
    fn test_member_equality_includes_id() {
        let a = Player::member(1, "SAME", 300, Position::Forward).unwrap();
        let b = Player::member(2, "SAME", 300, Position::Forward).unwrap();
        let c = Player::member(1, "SAME", 300, Position::Forward).unwrap();
        let guest = Player::guest("SAME", 300, Position::Forward).unwrap();

        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_ne!(a, guest);
    }

    #[test]
    fn test_json_defaults_and_kind() {
        let member = Player::from_json(r#"{"member_id": 42, "name": "JANE DOE"}"#).unwrap();
        assert_eq!(member.member_id(), Some(42));
        assert_eq!(member.skill(), DEFAULT_SKILL);
        assert_eq!(member.position(), Position::Forward);

        let guest = Player::from_json(r#"{"name": "VISITOR", "skill": 2000, "position": "Goalie"}"#)
            .unwrap();
        assert!(guest.is_guest());
        assert_eq!(guest.skill(), SKILL_MAX);

        let json = guest.to_json().unwrap();
        assert!(!json.contains("member_id"));
        assert_eq!(Player::from_json(&json).unwrap(), guest);
    }

    #[test]
    fn test_display() {
        let member = Player::member(1, "ANNA", 400, Position::Defense).unwrap();
        assert_eq!(member.to_string(), "ANNA  💪400  ⏮️");

        let guest = Player::guest("BOB", 300, Position::Goalie).unwrap();
        assert_eq!(guest.to_string(), "BOB  💪300  ⏹️  👤");
    }

    #[test]
    fn test_skill_level_lookup() {
        assert_eq!(SkillLevel::from_score(300), Some(SkillLevel::Average));
        assert_eq!(SkillLevel::from_score(301), None);
        assert_eq!(SkillLevel::Maximum.score(), SKILL_MAX);
        assert_eq!(SkillLevel::Minimum.score(), SKILL_MIN);
    }
}
