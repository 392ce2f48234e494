//! Imbalance scoring of a split

use std::borrow::Borrow;

use crate::model::{ImbalanceMetrics, Player};

/// Score a split
///
/// Every component is an absolute difference, so swapping the teams gives the
/// same result. When goalie counts differ, goalie skill is left out of
/// `skill_diff`: the goalie imbalance is already charged to
/// `goalie_count_diff`.
pub fn evaluate<P: Borrow<Player>>(team_a: &[P], team_b: &[P]) -> ImbalanceMetrics {
    let a = TeamTally::of(team_a);
    let b = TeamTally::of(team_b);

    let goalie_count_diff = a.goalies.abs_diff(b.goalies);
    let defense_count_diff = a.defenders.abs_diff(b.defenders);

    let (skill_a, skill_b) = if goalie_count_diff == 0 {
        (a.skill, b.skill)
    } else {
        (a.skill - a.goalie_skill, b.skill - b.goalie_skill)
    };

    ImbalanceMetrics {
        goalie_count_diff,
        defense_count_diff,
        skill_diff: skill_a.abs_diff(skill_b),
        defense_skill_diff: a.defense_skill.abs_diff(b.defense_skill),
    }
}

#[derive(Debug, Default)]
struct TeamTally {
    goalies: u32,
    defenders: u32,
    skill: i64,
    goalie_skill: i64,
    defense_skill: i64,
}

impl TeamTally {
    fn of<P: Borrow<Player>>(team: &[P]) -> Self {
        team.iter().fold(Self::default(), |mut tally, player| {
            let player = player.borrow();
            let skill = i64::from(player.skill());
            tally.skill += skill;
            if player.is_goalie() {
                tally.goalies += 1;
                tally.goalie_skill += skill;
            }
            if player.is_defense() {
                tally.defenders += 1;
                tally.defense_skill += skill;
            }
            tally
        })
    }
}
