use frontline_common::{MovementTarget, Transform};
use frontline_input::{InputState, MovementResolver, MovementResult};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::layout::{CameraLayout, SceneLayout};

/// Anything that can receive a resolved movement delta.
///
/// This is the whole contract between the input core and the engine: the
/// host decides what "the player" and "the camera" are.
pub trait MovementSink {
    fn apply_delta(&mut self, target: MovementTarget, delta: Vec3);
}

/// Free camera: a position and a fixed look direction.
///
/// Translating the camera keeps its orientation, so the look target moves
/// with it rather than staying pinned to the original point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub forward: Vec3,
}

impl CameraRig {
    pub fn from_layout(layout: &CameraLayout) -> Self {
        let forward = (layout.look_at - layout.position).normalize_or_zero();
        Self {
            position: layout.position,
            forward: if forward == Vec3::ZERO { Vec3::Z } else { forward },
        }
    }

    /// Point one unit along the view direction.
    pub fn look_target(&self) -> Vec3 {
        self.position + self.forward
    }
}

/// A record of every change made by [`Scene::step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A movement delta was applied to `target`.
    Moved { target: MovementTarget, delta: Vec3 },
    /// The scene advanced to `tick`.
    Stepped { tick: u64 },
}

/// Player, camera and tick counter for the demo scene.
///
/// Movement goes through [`MovementSink`] and is appended to an event log so
/// a run can be rebuilt with [`Scene::replay`].
#[derive(Debug, Clone)]
pub struct Scene {
    layout: SceneLayout,
    player: Transform,
    camera: CameraRig,
    tick: u64,
    event_log: Vec<SceneEvent>,
}

impl Scene {
    pub fn new(layout: SceneLayout) -> Self {
        let player = Transform::from_position(layout.player.position);
        let camera = CameraRig::from_layout(&layout.camera);
        Self {
            layout,
            player,
            camera,
            tick: 0,
            event_log: Vec::new(),
        }
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn player(&self) -> &Transform {
        &self.player
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current position of whichever object `target` names.
    pub fn position_of(&self, target: MovementTarget) -> Vec3 {
        match target {
            MovementTarget::Player => self.player.position,
            MovementTarget::Camera => self.camera.position,
        }
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Advance one tick: resolve `input`, move `target` if any binding is
    /// held, and log what happened.
    pub fn step(
        &mut self,
        input: &InputState,
        resolver: &MovementResolver,
        target: MovementTarget,
    ) -> MovementResult {
        let result = resolver.resolve(input);
        if result.is_moving {
            self.apply_delta(target, result.delta);
            self.event_log.push(SceneEvent::Moved {
                target,
                delta: result.delta,
            });
        }
        self.tick += 1;
        self.event_log.push(SceneEvent::Stepped { tick: self.tick });
        tracing::trace!(
            tick = self.tick,
            moving = result.is_moving,
            movement_target = %target,
            "scene step"
        );
        result
    }

    /// Rebuild a scene from `layout` and a previously recorded event log.
    pub fn replay(layout: SceneLayout, events: &[SceneEvent]) -> Self {
        let mut scene = Self::new(layout);
        for event in events {
            match event {
                SceneEvent::Moved { target, delta } => scene.apply_delta(*target, *delta),
                SceneEvent::Stepped { tick } => scene.tick = *tick,
            }
        }
        scene.event_log = events.to_vec();
        scene
    }

    /// FNV-1a digest of tick, player and camera state.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&self.tick.to_le_bytes());
        for v in [
            self.player.position,
            self.player.scale,
            self.camera.position,
            self.camera.forward,
        ] {
            for c in v.to_array() {
                mix(&c.to_le_bytes());
            }
        }
        for c in self.player.rotation.to_array() {
            mix(&c.to_le_bytes());
        }
        h
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneLayout::default())
    }
}

impl MovementSink for Scene {
    fn apply_delta(&mut self, target: MovementTarget, delta: Vec3) {
        match target {
            MovementTarget::Player => self.player.translate(delta),
            MovementTarget::Camera => self.camera.position += delta,
        }
    }
}
