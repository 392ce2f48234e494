//! Domain types: players, imbalance metrics, team splits, team metadata

mod player;
mod split;
mod team;

pub use player::{
    clamp_skill, Player, PlayerKind, PlayerRecord, Position, SkillLevel, DEFAULT_SKILL, SKILL_MAX,
    SKILL_MIN,
};
pub use split::{ImbalanceMetrics, TeamSplit};
pub use team::TeamMetadata;
