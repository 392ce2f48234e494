use serde::{Deserialize, Serialize};

/// Per-team settings kept alongside the computed splits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMetadata {
    /// Holdsport team id
    pub team_id: i64,
    pub name: String,
    /// Holdsport activity name that marks a practice
    #[serde(default)]
    pub activity_name: String,
    /// Label of `team_1` when rendering
    #[serde(default)]
    pub jersey_color_1: String,
    /// Label of `team_2` when rendering
    #[serde(default)]
    pub jersey_color_2: String,
}

impl TeamMetadata {
    pub fn new(team_id: i64, name: impl Into<String>) -> Self {
        Self {
            team_id,
            name: name.into(),
            activity_name: String::new(),
            jersey_color_1: String::new(),
            jersey_color_2: String::new(),
        }
    }

    pub fn with_activity(mut self, activity_name: impl Into<String>) -> Self {
        self.activity_name = activity_name.into();
        self
    }

    pub fn with_jerseys(mut self, color_1: impl Into<String>, color_2: impl Into<String>) -> Self {
        self.jersey_color_1 = color_1.into();
        self.jersey_color_2 = color_2.into();
        self
    }

    /// Label for team 1, falling back to "1" when no jersey color is set
    pub fn team_1_label(&self) -> &str {
        if self.jersey_color_1.is_empty() {
            "1"
        } else {
            &self.jersey_color_1
        }
    }

    /// Label for team 2, falling back to "2" when no jersey color is set
    pub fn team_2_label(&self) -> &str {
        if self.jersey_color_2.is_empty() {
            "2"
        } else {
            &self.jersey_color_2
        }
    }
}
