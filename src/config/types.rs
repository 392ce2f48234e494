//! Configuration types

use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_CANDIDATE_CAP;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Holdsport registration service
    #[serde(default)]
    pub holdsport: HoldsportConfig,
    /// Database configuration (optional, required for stored teams)
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// Team split search
    #[serde(default)]
    pub engine: EngineConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Holdsport API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldsportConfig {
    /// Base URL of the Holdsport REST API
    #[serde(default = "default_holdsport_url")]
    pub base_url: String,
    /// Basic auth login
    #[serde(default)]
    pub username: Option<String>,
    /// Basic auth password
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for HoldsportConfig {
    fn default() -> Self {
        Self {
            base_url: default_holdsport_url(),
            username: None,
            password: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl HoldsportConfig {
    /// Credentials, if both halves are configured
    pub fn credentials(&self) -> Option<HoldsportCredentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                Some(HoldsportCredentials::new(username.clone(), password.clone()))
            }
            _ => None,
        }
    }
}

fn default_holdsport_url() -> String {
    "https://api.holdsport.dk".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

/// Database configuration for stored teams, members and guests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_connection_timeout() -> u64 {
    30
}

/// Team split search settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tied candidates kept before the search stops early
    #[serde(default = "default_candidate_cap")]
    pub candidate_cap: usize,
    /// Player whose team is always labeled team 1
    #[serde(default)]
    pub anchor_player: Option<String>,
    /// Visit each unordered split once on even rosters
    #[serde(default)]
    pub distinct_splits: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            candidate_cap: default_candidate_cap(),
            anchor_player: None,
            distinct_splits: false,
        }
    }
}

fn default_candidate_cap() -> usize {
    DEFAULT_CANDIDATE_CAP
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Hours added to UTC when deciding which date is "today"
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            utc_offset_hours: default_utc_offset(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_utc_offset() -> i64 {
    2
}

/// Holdsport basic auth credentials
#[derive(Clone)]
pub struct HoldsportCredentials {
    pub username: String,
    pub password: String,
}

impl HoldsportCredentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl std::fmt::Debug for HoldsportCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldsportCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
