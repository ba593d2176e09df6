//! Scene: the objects movement is applied to, stepped once per tick.
//!
//! # Invariants
//! - All position changes flow through [`MovementSink::apply_delta`].
//! - Every applied movement is logged; replaying the log reproduces the scene.
//! - Stepping is pure with respect to the input state and resolver.

pub mod layout;
pub mod scene;

pub use layout::{CameraLayout, GroundLayout, LightLayout, PlayerLayout, SceneLayout};
pub use scene::{CameraRig, MovementSink, Scene, SceneEvent};
