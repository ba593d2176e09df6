use std::fmt;
use std::str::FromStr;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform placed at `position`.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Move by `delta` in world space.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

/// Which scene object receives movement deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementTarget {
    /// The sphere standing in for the player character.
    #[default]
    Player,
    /// The free camera.
    Camera,
}

impl MovementTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Camera => "camera",
        }
    }
}

impl fmt::Display for MovementTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither `player` nor `camera`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown movement target {0:?} (expected \"player\" or \"camera\")")]
pub struct ParseTargetError(pub String);

impl FromStr for MovementTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" => Ok(Self::Player),
            "camera" => Ok(Self::Camera),
            _ => Err(ParseTargetError(s.to_string())),
        }
    }
}
