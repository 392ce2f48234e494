//! Common test utilities and fixtures

#![allow(dead_code)]

use chrono::NaiveDate;
use falcon_formation::model::{Player, Position, TeamMetadata};

pub const TEAM_ID: i64 = 1234;

pub fn practice_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
}

pub fn member(id: u64, name: &str, skill: i32, position: Position) -> Player {
    Player::member(id, name, skill, position).unwrap()
}

pub fn guest(name: &str, skill: i32, position: Position) -> Player {
    Player::guest(name, skill, position).unwrap()
}

pub fn team_metadata() -> TeamMetadata {
    TeamMetadata::new(TEAM_ID, "Falcons")
        .with_activity("Ishockey træning")
        .with_jerseys("White", "Blue")
}

/// Ten players with mixed positions and skills
pub fn mixed_roster() -> Vec<Player> {
    vec![
        member(1, "ANNA", 450, Position::Defense),
        member(2, "BEN", 300, Position::Forward),
        member(3, "CARL", 700, Position::Goalie),
        member(4, "DANIEL MIZSAK", 520, Position::Forward),
        member(5, "EMIL", -100, Position::Forward),
        member(6, "FREJA", 610, Position::Defense),
        guest("GUSTAV", 300, Position::Goalie),
        guest("HELLE", 200, Position::Defense),
        member(7, "IDA", 880, Position::Forward),
        member(8, "JONAS", 150, Position::Defense),
    ]
}

/// Holdsport JSON payloads
pub mod holdsport_payloads {
    pub const ACTIVITIES: &str = r#"[
        {"id": 501, "name": "Ishockey træning", "starttime": "2024-03-14T19:30:00+01:00"},
        {"id": 502, "name": "Generalforsamling", "starttime": "2024-03-14T21:00:00+01:00"},
        {"id": 503, "name": "Ishockey træning", "starttime": "2024-03-21T19:30:00+01:00"}
    ]"#;

    pub const ACTIVITY_USERS: &str = r#"[
        {"user_id": 11, "name": "  anna   hansen ", "status": "Attending"},
        {"user_id": 12, "name": "Bo Jensen", "status": "Not attending"},
        {"user_id": 13, "name": "carl nielsen", "status": "Attending"}
    ]"#;

    pub const MEMBERS: &str = r#"[
        {"id": 11, "firstname": "anna", "lastname": "hansen"},
        {"id": 13, "firstname": "Carl", "lastname": "Nielsen"}
    ]"#;
}
