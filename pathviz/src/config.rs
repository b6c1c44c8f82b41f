//! Application configuration loaded from YAML.

use std::path::Path;

use pathviz_search::{Algorithm, Pacing};
use serde::{Deserialize, Serialize};

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/pathviz.yaml";

/// Largest accepted board side.
pub const MAX_GRID_SIDE: i32 = 1000;

/// Errors raised while loading a [`PathvizConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Board dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSection {
    pub rows: i32,
    pub cols: i32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self { rows: 20, cols: 40 }
    }
}

/// Delays between animation steps, in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSection {
    pub search_delay_ms: u64,
    pub trace_delay_ms: u64,
}

impl Default for AnimationSection {
    fn default() -> Self {
        Self {
            search_delay_ms: 10,
            trace_delay_ms: 30,
        }
    }
}

/// Random wall generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallsSection {
    /// Chance of each empty cell becoming a wall.
    pub density: f64,
    /// Fixed RNG seed; a fresh one per process when absent.
    pub seed: Option<u64>,
}

impl Default for WallsSection {
    fn default() -> Self {
        Self {
            density: 0.25,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSection {
    pub algorithm: Algorithm,
}

/// Full pathviz configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathvizConfig {
    #[serde(default)]
    pub grid: GridSection,

    #[serde(default)]
    pub animation: AnimationSection,

    #[serde(default)]
    pub walls: WallsSection,

    #[serde(default)]
    pub run: RunSection,
}

impl PathvizConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from [`DEFAULT_CONFIG_PATH`], or the defaults if it does not exist.
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
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

    /// Reject values no board can be built from.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let GridSection { rows, cols } = self.grid;
        if rows > MAX_GRID_SIDE || cols > MAX_GRID_SIDE {
            return Err(ConfigLoadError::Invalid(format!(
                "grid {rows}x{cols} exceeds {MAX_GRID_SIDE} cells per side"
            )));
        }
        if rows < 1 || cols < 1 || rows.checked_mul(cols).is_none_or(|n| n < 2) {
            return Err(ConfigLoadError::Invalid(format!(
                "grid {rows}x{cols} cannot hold a start and a goal"
            )));
        }
        if !(0.0..=1.0).contains(&self.walls.density) {
            return Err(ConfigLoadError::Invalid(format!(
                "wall density {} is outside 0..=1",
                self.walls.density
            )));
        }
        Ok(())
    }

    pub fn pacing(&self) -> Pacing {
        Pacing::from_millis(
            self.animation.search_delay_ms,
            self.animation.trace_delay_ms,
        )
    }
}
