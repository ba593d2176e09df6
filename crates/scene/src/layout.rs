use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Static description of the demo scene. The host engine builds meshes,
/// materials and lights from it; nothing here changes after start-up.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneLayout {
    pub ground: GroundLayout,
    pub light: LightLayout,
    pub player: PlayerLayout,
    pub camera: CameraLayout,
}

/// Flat ground plane centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundLayout {
    pub width: f32,
    pub depth: f32,
    pub subdivisions: u32,
    /// Ambient colour, linear RGB.
    pub color: [f32; 3],
}

impl Default for GroundLayout {
    fn default() -> Self {
        Self {
            width: 100.0,
            depth: 100.0,
            subdivisions: 1,
            color: [0.0, 1.0, 0.0],
        }
    }
}

/// Hemispheric light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightLayout {
    pub direction: Vec3,
    pub intensity: f32,
}

impl Default for LightLayout {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 5.0, 0.0),
            intensity: 0.7,
        }
    }
}

/// The sphere standing in for the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerLayout {
    pub position: Vec3,
    pub diameter: f32,
    pub segments: u32,
}

impl Default for PlayerLayout {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            diameter: 2.0,
            segments: 16,
        }
    }
}

/// Free camera start pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraLayout {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraLayout {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, -10.0),
            look_at: Vec3::ZERO,
        }
    }
}
