use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::terrain::{TerrainCoefficients, TerrainType};

/// Map dimensions and generation seed.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    /// World units per grid cell.
    pub world_scale: f32,
    pub seed: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            world_scale: 10.0,
            seed: 12345,
        }
    }
}

/// Every tunable constant of the simulation. Inserted once before the world
/// is initialised and never mutated afterwards.
///
/// `base_wear_rate`, `supply_demand_impact`, `inflation_rate`,
/// `weather_impact` and `level_bonus_multiplier` are accepted so existing
/// balance files load, but no system reads them: wear rates come from the
/// wagon table, price drift and storm penalties are fixed, and level rewards
/// scale with the level alone.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Convoy
    pub start_gold: u32,
    pub start_food: u32,
    pub start_guards: u32,
    /// Food units eaten per second of travel.
    pub food_consumption_rate: f32,
    pub base_movement_speed: f32,
    /// Not read by any system.
    pub base_wear_rate: f32,

    pub map: MapConfig,

    // Economy
    pub base_price_multiplier: f32,
    /// Not read by any system.
    pub supply_demand_impact: f32,
    /// Not read by any system.
    pub inflation_rate: f32,

    // Events & combat
    pub event_chance: f32,
    pub combat_difficulty: f32,
    /// Not read by any system.
    pub weather_impact: f32,

    // Progression
    pub exp_per_level: u32,
    /// Not read by any system.
    pub level_bonus_multiplier: f32,

    // Personnel
    pub guard_salary: u32,
    pub guard_hire_cost: u32,

    /// Replacement coefficients for individual terrain types.
    pub terrain_overrides: BTreeMap<TerrainType, TerrainCoefficients>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_gold: 1000,
            start_food: 100,
            start_guards: 5,
            food_consumption_rate: 2.0,
            base_movement_speed: 5.0,
            base_wear_rate: 0.1,
            map: MapConfig::default(),
            base_price_multiplier: 1.0,
            supply_demand_impact: 0.5,
            inflation_rate: 0.01,
            event_chance: 0.25,
            combat_difficulty: 1.0,
            weather_impact: 0.3,
            exp_per_level: 100,
            level_bonus_multiplier: 1.1,
            guard_salary: 2,
            guard_hire_cost: 25,
            terrain_overrides: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read game config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        GameConfig::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.width == 0 || self.map.height == 0 {
            return Err(invalid("map", "width and height must be positive"));
        }
        if self.map.world_scale <= 0.0 {
            return Err(invalid("map.world_scale", "must be positive"));
        }
        if self.food_consumption_rate < 0.0 {
            return Err(invalid("food_consumption_rate", "must not be negative"));
        }
        if self.base_movement_speed <= 0.0 {
            return Err(invalid("base_movement_speed", "must be positive"));
        }
        if self.base_wear_rate < 0.0 {
            return Err(invalid("base_wear_rate", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err(invalid("event_chance", "must lie in [0, 1]"));
        }
        if self.exp_per_level == 0 {
            return Err(invalid("exp_per_level", "must be positive"));
        }
        Ok(())
    }

    /// Terrain coefficients with any configured override applied.
    pub fn terrain(&self, terrain: TerrainType) -> TerrainCoefficients {
        self.terrain_overrides
            .get(&terrain)
            .copied()
            .unwrap_or_else(|| terrain.coefficients())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = GameConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.start_gold, 1000);
        assert_eq!(config.map.width, 100);
    }

    #[test]
    fn partial_override() {
        let config =
            GameConfig::from_json_str(r#"{"start_gold": 50, "map": {"width": 20}}"#).unwrap();
        assert_eq!(config.start_gold, 50);
        assert_eq!(config.map.width, 20);
        assert_eq!(config.map.height, 100);
        assert_eq!(config.start_food, 100);
    }

    #[test]
    fn terrain_override_by_name() {
        let json = r#"{"terrain_overrides": {"desert": {
            "movement_cost": 3.0, "wear_multiplier": 4.0,
            "danger_level": 0.9, "food_availability": 0.0}}}"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.terrain(TerrainType::Desert).wear_multiplier, 4.0);
        assert_eq!(config.terrain(TerrainType::Plains).wear_multiplier, 1.0);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_event_chance_is_rejected() {
        let err = GameConfig::from_json_str(r#"{"event_chance": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "event_chance", .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = GameConfig::from_file(&path).unwrap_err();
        match err {
            ConfigError::ReadFailed { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, r#"{"start_guards": 12}"#).unwrap();
        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.start_guards, 12);
    }
}
