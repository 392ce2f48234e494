//! Holdsport API response types

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Entry of `GET /v1/teams`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
}

/// Entry of `GET /v1/teams/{team_id}/activities`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    /// Local start time, e.g. `2024-03-14T19:00:00+01:00`
    pub starttime: String,
}

impl ActivityResponse {
    /// Start time with its local offset
    pub fn start(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.starttime)
            .or_else(|_| DateTime::parse_from_str(&self.starttime, "%Y-%m-%dT%H:%M:%S%z"))
            .ok()
    }

    /// Calendar date of the activity in its own time zone
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start().map(|start| start.date_naive())
    }
}

/// Entry of `GET /v1/activities/{activity_id}/activities_users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityUserResponse {
    pub user_id: u64,
    pub name: String,
    /// "Attending", "Not attending", ...
    pub status: String,
}

impl ActivityUserResponse {
    pub fn is_attending(&self) -> bool {
        self.status == "Attending"
    }
}

/// Entry of `GET /v1/teams/{team_id}/members`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_start_date_uses_local_offset() {
        let activity: ActivityResponse = serde_json::from_str(
            r#"{"id": 55, "name": "Practice", "starttime": "2024-03-14T23:30:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(activity.start_date(), NaiveDate::from_ymd_opt(2024, 3, 14));

        let compact = ActivityResponse {
            id: None,
            name: "Practice".to_string(),
            starttime: "2024-03-14T19:00:00+0100".to_string(),
        };
        assert_eq!(compact.start_date(), NaiveDate::from_ymd_opt(2024, 3, 14));

        let broken = ActivityResponse {
            id: Some(1),
            name: "Practice".to_string(),
            starttime: "tomorrow".to_string(),
        };
        assert_eq!(broken.start_date(), None);
    }
}
