//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene; they never move anything.
//!
//! The only backend shipped is a text renderer for the CLI and tests. A GPU
//! engine plugs in by implementing [`Renderer`].

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "frontline-render v0.1.0"
}
