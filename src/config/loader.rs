//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::{AppConfig, AppSettings, DatabaseConfig, EngineConfig, HoldsportConfig};
use crate::common::errors::{FormationError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. HOLDSPORT_USERNAME / HOLDSPORT_PASSWORD for the Holdsport credentials
/// 2. Environment variables (prefixed with APP, `__` separated)
/// 3. Configuration file (TOML format)
/// 4. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| FormationError::Configuration(e.to_string()))?;

    let mut config: AppConfig = config
        .try_deserialize()
        .map_err(|e| FormationError::Configuration(e.to_string()))?;

    apply_holdsport_env(&mut config.holdsport);
    validate(&config)?;
    Ok(config)
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut holdsport = HoldsportConfig::default();
    if let Ok(url) = std::env::var("HOLDSPORT_URL") {
        holdsport.base_url = url;
    }
    apply_holdsport_env(&mut holdsport);

    let database = std::env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
        url,
        max_connections: 5,
        connection_timeout_seconds: 30,
    });

    let engine = EngineConfig {
        anchor_player: std::env::var("ANCHOR_PLAYER").ok().filter(|s| !s.is_empty()),
        ..EngineConfig::default()
    };

    let config = AppConfig {
        holdsport,
        database,
        engine,
        settings: AppSettings::default(),
    };
    validate(&config)?;
    Ok(config)
}

fn apply_holdsport_env(holdsport: &mut HoldsportConfig) {
    if let Ok(username) = std::env::var("HOLDSPORT_USERNAME") {
        holdsport.username = Some(username);
    }
    if let Ok(password) = std::env::var("HOLDSPORT_PASSWORD") {
        holdsport.password = Some(password);
    }
}

fn validate(config: &AppConfig) -> Result<()> {
    if config.engine.candidate_cap == 0 {
        return Err(FormationError::Configuration(
            "engine.candidate_cap must be at least 1".to_string(),
        ));
    }
    if !(-12..=14).contains(&config.settings.utc_offset_hours) {
        return Err(FormationError::Configuration(format!(
            "settings.utc_offset_hours out of range: {}",
            config.settings.utc_offset_hours
        )));
    }
    Ok(())
}
