use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A logical movement action, independent of the physical key that triggers it.
///
/// Hosts never reason about raw keys past the [`KeyMap`]; everything downstream
/// of the map only sees bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyBinding {
    /// Towards +z.
    MoveForward,
    /// Towards -z.
    MoveBackward,
    /// Towards -x.
    MoveLeft,
    /// Towards +x.
    MoveRight,
}

impl KeyBinding {
    /// Every binding, in resolution order.
    pub const ALL: [KeyBinding; 4] = [
        KeyBinding::MoveForward,
        KeyBinding::MoveBackward,
        KeyBinding::MoveLeft,
        KeyBinding::MoveRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::MoveForward => "MoveForward",
            Self::MoveBackward => "MoveBackward",
            Self::MoveLeft => "MoveLeft",
            Self::MoveRight => "MoveRight",
        }
    }

    /// Unit direction on the ground plane. y is always zero.
    pub fn direction(self) -> Vec3 {
        match self {
            Self::MoveForward => Vec3::Z,
            Self::MoveBackward => Vec3::NEG_Z,
            Self::MoveLeft => Vec3::NEG_X,
            Self::MoveRight => Vec3::X,
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key binding {0:?}")]
pub struct ParseBindingError(pub String);

impl FromStr for KeyBinding {
    type Err = ParseBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| ParseBindingError(s.to_string()))
    }
}

/// Alias table from raw key identifiers to logical bindings.
///
/// Raw identifiers are matched exactly, so `"w"` and `"W"` are different keys.
/// Several raw keys may share a binding; a raw key maps to at most one.
/// BTreeMap keeps iteration (and therefore logging and `info` output) stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    aliases: BTreeMap<String, KeyBinding>,
}

impl KeyMap {
    /// A map with no aliases. Every raw key is ignored.
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// WASD plus the arrow keys.
    pub fn default_layout() -> Self {
        Self::empty()
            .with_alias("w", KeyBinding::MoveForward)
            .with_alias("ArrowUp", KeyBinding::MoveForward)
            .with_alias("s", KeyBinding::MoveBackward)
            .with_alias("ArrowDown", KeyBinding::MoveBackward)
            .with_alias("a", KeyBinding::MoveLeft)
            .with_alias("ArrowLeft", KeyBinding::MoveLeft)
            .with_alias("d", KeyBinding::MoveRight)
            .with_alias("ArrowRight", KeyBinding::MoveRight)
    }

    /// Add or replace the binding for `raw_key`.
    pub fn with_alias(mut self, raw_key: impl Into<String>, binding: KeyBinding) -> Self {
        self.aliases.insert(raw_key.into(), binding);
        self
    }

    pub fn binding_for(&self, raw_key: &str) -> Option<KeyBinding> {
        self.aliases.get(raw_key).copied()
    }

    /// Raw keys that trigger `binding`.
    pub fn keys_for(&self, binding: KeyBinding) -> impl Iterator<Item = &str> + '_ {
        self.aliases
            .iter()
            .filter(move |(_, b)| **b == binding)
            .map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, KeyBinding)> + '_ {
        self.aliases.iter().map(|(k, b)| (k.as_str(), *b))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::default_layout()
    }
}
