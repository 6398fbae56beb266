//! # Configuration
//!
//! World and application settings, loaded from an optional JSON file.
//!
//! A config may name one of the built-in size presets instead of spelling out
//! dimensions:
//!
//! ```json
//! { "world": { "preset": "medium", "seed": 7, "tree_count": 6 } }
//! ```
//!
//! Explicit `size_x`/`size_y`/`size_z` values override the preset.

use std::{fs, io, path::Path};

use log::{debug, info};
use phf::phf_map;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::{
    voxels::{error::WorldError, terrain::TerrainSettings},
    DEFAULT_REACH,
};

/// File read by [`ApplicationConfig::load_or_default`] when present
pub const DEFAULT_CONFIG_PATH: &str = "world.json";

/// Dimensions of a named world size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSize {
    pub size_x: i32,
    pub size_y: i32,
    pub size_z: i32,
}

/// Named world sizes
pub static WORLD_SIZE_PRESETS: phf::Map<&'static str, WorldSize> = phf_map! {
    "small" => WorldSize { size_x: 32, size_y: 8, size_z: 32 },
    "medium" => WorldSize { size_x: 128, size_y: 16, size_z: 128 },
    "large" => WorldSize { size_x: 1000, size_y: 16, size_z: 1000 },
};

/// Preset used when a config names neither a preset nor dimensions
pub const DEFAULT_PRESET: &str = "small";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown world size preset `{0}`")]
    UnknownPreset(String),

    #[error(transparent)]
    World(#[from] WorldError),
}

/// Settings of the voxel world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Name of a size preset, see [`WORLD_SIZE_PRESETS`]
    pub preset: Option<String>,
    pub size_x: Option<i32>,
    pub size_y: Option<i32>,
    pub size_z: Option<i32>,
    pub seed: u32,
    pub tree_count: u32,
    pub tree_min_radius: f32,
    pub tree_max_radius: f32,
    pub tree_min_spacing: f32,
    /// Maximum targeting distance, in blocks
    pub reach: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let terrain = TerrainSettings::default();
        WorldConfig {
            preset: None,
            size_x: None,
            size_y: None,
            size_z: None,
            seed: terrain.seed,
            tree_count: terrain.tree_count,
            tree_min_radius: terrain.tree_min_radius,
            tree_max_radius: terrain.tree_max_radius,
            tree_min_spacing: terrain.tree_min_spacing,
            reach: DEFAULT_REACH,
        }
    }
}

impl WorldConfig {
    /// A config for one of the named presets.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        let config = WorldConfig {
            preset: Some(name.to_owned()),
            ..WorldConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolves the world dimensions from the preset and explicit overrides.
    ///
    /// # Errors
    /// `UnknownPreset` for an unrecognized preset name.
    pub fn dimensions(&self) -> Result<WorldSize, ConfigError> {
        let name = self.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        let preset = WORLD_SIZE_PRESETS
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_owned()))?;

        Ok(WorldSize {
            size_x: self.size_x.unwrap_or(preset.size_x),
            size_y: self.size_y.unwrap_or(preset.size_y),
            size_z: self.size_z.unwrap_or(preset.size_z),
        })
    }

    /// The terrain generator settings carried by this config.
    pub fn terrain_settings(&self) -> TerrainSettings {
        TerrainSettings {
            seed: self.seed,
            tree_count: self.tree_count,
            tree_min_radius: self.tree_min_radius,
            tree_max_radius: self.tree_max_radius,
            tree_min_spacing: self.tree_min_spacing,
        }
    }

    /// Checks every value a world could not be built from.
    pub fn validate(&self) -> Result<WorldSize, ConfigError> {
        let size = self.dimensions()?;
        if size.size_x <= 0 || size.size_y <= 0 || size.size_z <= 0 {
            return Err(invalid(format!(
                "dimensions must be positive, got {}x{}x{}",
                size.size_x, size.size_y, size.size_z
            )));
        }
        if !(self.tree_min_radius >= 0.0 && self.tree_min_radius <= self.tree_max_radius) {
            return Err(invalid(format!(
                "tree radii must satisfy 0 <= min <= max, got {}..{}",
                self.tree_min_radius, self.tree_max_radius
            )));
        }
        if !(self.tree_min_spacing >= 0.0) {
            return Err(invalid(format!(
                "tree spacing must not be negative, got {}",
                self.tree_min_spacing
            )));
        }
        if !(self.reach > 0.0 && self.reach.is_finite()) {
            return Err(invalid(format!("reach must be positive, got {}", self.reach)));
        }
        Ok(size)
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::World(WorldError::InvalidConfiguration(message))
}

/// Top-level settings of the application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub world: WorldConfig,
    /// Seconds between FPS log lines
    pub fps_report_interval: Option<f32>,
}

impl ApplicationConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ApplicationConfig = serde_json::from_str(json)?;
        config.world.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the config at `path`, or the defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::Io(error)) if error.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.as_ref().display());
                Ok(Self::default())
            }
            result => result,
        }
    }
}
