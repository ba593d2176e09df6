use glam::Vec3;

use crate::binding::KeyBinding;
use crate::config::ControlConfig;
use crate::state::InputState;

/// Movement for a single tick. Consumed by the host and discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementResult {
    /// World-space delta. Only x and z are ever non-zero.
    pub delta: Vec3,
    /// At least one binding was held, even if opposing keys cancelled out.
    pub is_moving: bool,
}

/// Resolve held bindings into a delta of `step` per active binding.
///
/// Axes accumulate independently: forward and backward together cancel on z
/// but still report `is_moving`.
pub fn resolve(state: &InputState, step: f32) -> MovementResult {
    let mut result = MovementResult::default();
    for binding in KeyBinding::ALL {
        if state.is_active(binding) {
            result.delta += binding.direction() * step;
            result.is_moving = true;
        }
    }
    result
}

/// [`resolve`] with the step size fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementResolver {
    step: f32,
}

impl MovementResolver {
    pub fn new(step: f32) -> Self {
        Self { step }
    }

    pub fn from_config(config: &ControlConfig) -> Self {
        Self::new(config.step_size)
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn resolve(&self, state: &InputState) -> MovementResult {
        resolve(state, self.step)
    }
}

impl Default for MovementResolver {
    fn default() -> Self {
        Self::from_config(&ControlConfig::default())
    }
}
