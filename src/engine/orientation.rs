//! Labeling and sorting of the selected split

use chrono::NaiveDate;
use std::borrow::Borrow;

use crate::model::{ImbalanceMetrics, Player, TeamSplit};

/// Turn an unordered split into a `TeamSplit`
///
/// The half holding a player named `anchor` becomes `team_1`. Without an
/// anchor, or when nobody on the roster has that name, `team_a` becomes
/// `team_1`. Both teams come out sorted by name.
pub fn orient<P: Borrow<Player>>(
    date: NaiveDate,
    team_a: &[P],
    team_b: &[P],
    metrics: ImbalanceMetrics,
    anchor: Option<&str>,
) -> TeamSplit {
    let anchor_in_b = anchor.is_some_and(|name| {
        !contains(team_a, name) && contains(team_b, name)
    });
    let (first, second) = if anchor_in_b {
        (team_b, team_a)
    } else {
        (team_a, team_b)
    };

    TeamSplit {
        date,
        team_1: sorted_by_name(first),
        team_2: sorted_by_name(second),
        metrics,
    }
}

fn contains<P: Borrow<Player>>(team: &[P], name: &str) -> bool {
    team.iter().any(|p| p.borrow().name() == name)
}

fn sorted_by_name<P: Borrow<Player>>(team: &[P]) -> Vec<Player> {
    let mut players: Vec<Player> = team.iter().map(|p| p.borrow().clone()).collect();
    players.sort_by(|a, b| a.name().cmp(b.name()));
    players
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()
    }

    fn team(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .map(|n| Player::guest(*n, 300, Position::Forward).unwrap())
            .collect()
    }

    fn names(players: &[Player]) -> Vec<&str> {
        players.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn test_anchor_in_second_half_is_moved_to_team_1() {
        let a = team(&["ZED", "ALF"]);
        let b = team(&["MIA", "DANIEL MIZSAK"]);
        let split = orient(date(), &a, &b, ImbalanceMetrics::default(), Some("DANIEL MIZSAK"));

        assert_eq!(names(&split.team_1), vec!["DANIEL MIZSAK", "MIA"]);
        assert_eq!(names(&split.team_2), vec!["ALF", "ZED"]);
    }

    #[test]
    fn test_anchor_in_first_half_stays() {
        let a = team(&["KIM", "ANCHOR"]);
        let b = team(&["BEA"]);
        let split = orient(date(), &a, &b, ImbalanceMetrics::default(), Some("ANCHOR"));

        assert_eq!(names(&split.team_1), vec!["ANCHOR", "KIM"]);
        assert_eq!(split.team_of("ANCHOR"), Some(1));
    }

    #[test]
    fn test_missing_anchor_keeps_generated_order() {
        let a = team(&["C", "A"]);
        let b = team(&["D", "B"]);
        let metrics = ImbalanceMetrics::new(0, 0, 5, 0);

        for anchor in [None, Some("NOT HERE")] {
            let split = orient(date(), &a, &b, metrics, anchor);
            assert_eq!(names(&split.team_1), vec!["A", "C"]);
            assert_eq!(names(&split.team_2), vec!["B", "D"]);
            assert_eq!(split.metrics, metrics);
            assert_eq!(split.date, date());
        }
    }
}
