//! Main BhavanConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::{RasterizerConfig, WallBufferExpander};
use crate::pathfinding::PlannerConfig;

use super::error::ConfigLoadError;
use super::grid::GridSection;
use super::pathfinding::PathfindingSection;

/// Full configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct BhavanConfig {
    /// Rasterization settings
    #[serde(default)]
    pub grid: GridSection,

    /// Planner settings
    #[serde(default)]
    pub pathfinding: PathfindingSection,
}

impl BhavanConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    pub fn to_rasterizer_config(&self) -> RasterizerConfig {
        self.grid.to_rasterizer_config()
    }

    pub fn to_planner_config(&self) -> PlannerConfig {
        self.pathfinding.to_planner_config()
    }

    /// Wall buffer for a loaded grid's cell size.
    pub fn wall_buffer_expander(&self, grid_size: f64) -> WallBufferExpander {
        self.pathfinding.wall_buffer_expander(grid_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::{CostMode, HeuristicCombine};

    #[test]
    fn test_default_config() {
        let config = BhavanConfig::default();
        assert_eq!(config.grid.grid_size, 0.3);
        assert_eq!(config.grid.padding, 1);
        assert!(config.pathfinding.diagonal);
        assert_eq!(config.pathfinding.mode, CostMode::MinimizeCost);
        assert_eq!(config.pathfinding.heuristic, HeuristicCombine::Min);
        assert_eq!(config.to_planner_config().max_iterations, None);
    }

    #[test]
    fn test_explicit_iteration_cap() {
        let config = BhavanConfig::from_yaml("pathfinding:\n  max_iterations: 250\n").unwrap();
        assert_eq!(config.to_planner_config().max_iterations, Some(250));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = BhavanConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = BhavanConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
grid:
  grid_size: 0.25
pathfinding:
  mode: minimize_distance
  heuristic: sum
  diagonal: false
  wall_buffer: 0.6
  costs:
    door: 2.5
"#;
        let config = BhavanConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.grid.grid_size, 0.25);
        assert_eq!(config.grid.min_floor_height, 1.5);

        let planner = config.to_planner_config();
        assert_eq!(planner.mode, CostMode::MinimizeDistance);
        assert_eq!(planner.combine, HeuristicCombine::Sum);
        assert!(!planner.allow_diagonal);
        assert_eq!(planner.costs.door, 2.5);
        assert_eq!(planner.costs.stair, 1.25);

        assert_eq!(config.wall_buffer_expander(0.2).distance(), 3);
        assert_eq!(config.to_rasterizer_config().grid_size, 0.25);
    }

    #[test]
    fn test_bad_yaml() {
        let err = BhavanConfig::from_yaml("pathfinding:\n  mode: fastest\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));

        let err = BhavanConfig::load(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io(_)));
    }
}
