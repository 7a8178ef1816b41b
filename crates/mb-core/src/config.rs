//! Engine configuration
//!
//! Limits and server policies that differ between installations. Loaded
//! from JSON; every field has a default, so a partial file is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_GRIDS;
use crate::error::ConfigError;

/// Player-versus-player policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PvpMode {
    /// Players never harm each other
    Never,
    /// Only players who declared hostility harm each other
    #[default]
    Hostile,
    /// Anyone outside the attacker's party can be harmed
    Always,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum projection travel distance
    pub max_range: i32,
    /// Cells a single projection may touch (never above 256)
    pub max_grids: usize,
    /// Largest blast radius honoured
    pub max_radius: i32,
    /// How far players can see
    pub max_sight: i32,
    /// Hard cap on teleport distance
    pub teleport_cap: i32,
    /// Visual thinning: roughly one visual in `visual_density` is sent
    pub visual_density: i32,
    pub pvp_mode: PvpMode,
    /// Players at or above this level cannot clone monsters
    pub clone_level_gate: i32,
    /// Level teleport only goes down
    pub ironman: bool,
    pub max_depth: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_range: 32,
            max_grids: MAX_GRIDS,
            max_radius: 9,
            max_sight: 20,
            teleport_cap: 200,
            visual_density: 5,
            pvp_mode: PvpMode::Hostile,
            clone_level_gate: 10,
            ironman: false,
            max_depth: 127,
        }
    }
}

impl EngineConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        Ok(config.sanitized())
    }

    /// Clamp values into their supported ranges
    pub fn sanitized(mut self) -> Self {
        self.max_grids = self.max_grids.clamp(1, MAX_GRIDS);
        self.max_range = self.max_range.max(1);
        self.max_radius = self.max_radius.clamp(0, 15);
        self.teleport_cap = self.teleport_cap.max(1);
        self.visual_density = self.visual_density.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "max_range": 18, "pvp_mode": "always" }"#).unwrap();
        assert_eq!(config.max_range, 18);
        assert_eq!(config.pvp_mode, PvpMode::Always);
        assert_eq!(config.max_grids, 256);
        assert_eq!(config.teleport_cap, 200);
    }

    #[test]
    fn test_grid_cap_cannot_be_raised() {
        let config = EngineConfig::from_json(r#"{ "max_grids": 4096 }"#).unwrap();
        assert_eq!(config.max_grids, MAX_GRIDS);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let err = EngineConfig::from_json("{ max_range: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load_from_file(Path::new("/nonexistent/engine.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/engine.json"));
    }
}
