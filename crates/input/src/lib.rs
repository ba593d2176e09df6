//! Input: raw key transitions mapped onto logical movement bindings, resolved
//! into a per-tick movement delta.
//!
//! # Invariants
//! - Every operation is total; unbound raw keys are ignored.
//! - A movement result depends only on the held keys and the step size.
//! - The key map is fixed once an `InputState` is built from it.

pub mod binding;
pub mod config;
pub mod movement;
pub mod script;
pub mod state;

pub use binding::{KeyBinding, KeyMap, ParseBindingError};
pub use config::{ConfigError, ControlConfig, DEFAULT_STEP_SIZE};
pub use movement::{MovementResolver, MovementResult, resolve};
pub use script::{InputScript, ScriptError, ScriptOp};
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "frontline-input v0.1.0"
}
