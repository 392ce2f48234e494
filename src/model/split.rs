//! Imbalance scores and finished team splits

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::player::Player;

/// Imbalance vector of a two-team split
///
/// Field order is the comparison order: the derived `Ord` compares
/// lexicographically, goalie difference first. Smaller is better.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ImbalanceMetrics {
    pub goalie_count_diff: u32,
    pub defense_count_diff: u32,
    pub skill_diff: u64,
    pub defense_skill_diff: u64,
}

impl ImbalanceMetrics {
    pub fn new(
        goalie_count_diff: u32,
        defense_count_diff: u32,
        skill_diff: u64,
        defense_skill_diff: u64,
    ) -> Self {
        Self {
            goalie_count_diff,
            defense_count_diff,
            skill_diff,
            defense_skill_diff,
        }
    }

    /// Perfectly balanced split
    pub fn is_balanced(&self) -> bool {
        *self == Self::default()
    }

    pub fn as_tuple(&self) -> (u32, u32, u64, u64) {
        (
            self.goalie_count_diff,
            self.defense_count_diff,
            self.skill_diff,
            self.defense_skill_diff,
        )
    }
}

impl std::fmt::Display for ImbalanceMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.goalie_count_diff, self.defense_count_diff, self.skill_diff, self.defense_skill_diff
        )
    }
}

/// Labeled, name-sorted result of one team computation
///
/// A snapshot: it is replaced wholesale by a later computation for the same
/// team and date, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub date: NaiveDate,
    pub team_1: Vec<Player>,
    pub team_2: Vec<Player>,
    pub metrics: ImbalanceMetrics,
}

impl TeamSplit {
    pub fn player_count(&self) -> usize {
        self.team_1.len() + self.team_2.len()
    }

    /// Which team (1 or 2) a player with this name is on
    pub fn team_of(&self, name: &str) -> Option<u8> {
        if self.team_1.iter().any(|p| p.name() == name) {
            Some(1)
        } else if self.team_2.iter().any(|p| p.name() == name) {
            Some(2)
        } else {
            None
        }
    }

    pub fn goalie_count(&self) -> usize {
        self.team_1
            .iter()
            .chain(self.team_2.iter())
            .filter(|p| p.is_goalie())
            .count()
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn from_json(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}
