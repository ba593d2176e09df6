//! Control configuration: which object moves, how far per tick, extra key aliases.
//!
//! Files are YAML (`.yaml`, `.yml`) or JSON (`.json`), keyed in camelCase:
//! ```text
//! movementTarget: camera
//! stepSize: 0.25
//! aliases:
//!   i: MoveForward
//!   k: MoveBackward
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use frontline_common::MovementTarget;
use serde::{Deserialize, Serialize};

use crate::binding::{KeyBinding, KeyMap};

/// Distance moved per tick per held binding when nothing else is configured.
pub const DEFAULT_STEP_SIZE: f32 = 0.1;

/// Errors from loading or validating a [`ControlConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {} (expected .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("step size must be finite and non-negative, got {0}")]
    InvalidStepSize(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ControlConfig {
    pub movement_target: MovementTarget,
    pub step_size: f32,
    /// Raw key → binding, layered over the default WASD/arrow layout.
    pub aliases: BTreeMap<String, KeyBinding>,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            movement_target: MovementTarget::Player,
            step_size: DEFAULT_STEP_SIZE,
            aliases: BTreeMap::new(),
        }
    }
}

impl ControlConfig {
    pub fn from_yaml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk, picking the format by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let src = match ext.as_deref() {
            Some("yaml" | "yml" | "json") => {
                std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        let config = if ext.as_deref() == Some("json") {
            Self::from_json_str(&src)?
        } else {
            Self::from_yaml_str(&src)?
        };
        tracing::info!(
            path = %path.display(),
            movement_target = %config.movement_target,
            step = config.step_size,
            aliases = config.aliases.len(),
            "loaded control config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.step_size.is_finite() || self.step_size < 0.0 {
            return Err(ConfigError::InvalidStepSize(self.step_size));
        }
        Ok(())
    }

    /// The default layout with this config's aliases applied on top.
    pub fn key_map(&self) -> KeyMap {
        self.aliases
            .iter()
            .fold(KeyMap::default_layout(), |map, (key, binding)| {
                map.with_alias(key.clone(), *binding)
            })
    }
}
