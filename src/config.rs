//! Startup configuration (`drift-master.toml`)
//!
//! Every field has a default, so a missing file or a partial one is fine.
//! The path can be overridden with `DRIFT_MASTER_CONFIG`.

use crate::game_logic::Selection;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "DRIFT_MASTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "drift-master.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub game: GameplayConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_true")]
    pub vsync: bool,
}

/// Starting selection and randomness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameplayConfig {
    /// Fixed RNG seed for reproducible runs; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Track, car and color names, matched case-insensitively.
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub car: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Score server connection. Off unless enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token; skips login when set.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// When set, a login rejected for an unknown account registers it under this name.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u32,
}

fn default_title() -> String {
    "Drift Master 2D".to_string()
}
fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    "http://127.0.0.1:8001".to_string()
}
fn default_leaderboard_limit() -> u32 {
    10
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            vsync: true,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            token: None,
            email: None,
            password: None,
            username: None,
            leaderboard_limit: default_leaderboard_limit(),
        }
    }
}

impl GameConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`. A file that doesn't exist yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load from the usual place, falling back to defaults on any error.
    ///
    /// The error comes back alongside so it can be logged once logging is up.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        match Self::load_from(&Self::path()) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Starting selection from the configured names. Unknown names are returned for reporting.
    pub fn selection(&self) -> (Selection, Vec<String>) {
        let mut selection = Selection::default();
        let mut unknown = Vec::new();
        let game = &self.game;
        if let Some(name) = &game.track {
            if !selection.select_track_named(name) {
                unknown.push(name.clone());
            }
        }
        if let Some(name) = &game.car {
            if !selection.select_car_named(name) {
                unknown.push(name.clone());
            }
        }
        if let Some(name) = &game.color {
            if !selection.select_color_named(name) {
                unknown.push(name.clone());
            }
        }
        (selection, unknown)
    }
}

/// Problems found while loading config, reported once the log is live.
#[derive(Resource, Debug, Default)]
pub struct ConfigWarnings(pub Vec<String>);

pub fn report_config_warnings(warnings: Res<ConfigWarnings>, config: Res<GameConfig>) {
    for warning in &warnings.0 {
        warn!("{}", warning);
    }
    info!(
        "Config: service {} ({}), seed {:?}",
        if config.service.enabled { "enabled" } else { "disabled" },
        config.service.base_url,
        config.game.seed
    );
}
