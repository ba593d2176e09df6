//! Shared types: spatial transforms and the movement target selector.
//!
//! # Invariants
//! - Types here carry no engine handles; hosts map them onto their own objects.

pub mod types;

pub use types::{MovementTarget, ParseTargetError, Transform};
