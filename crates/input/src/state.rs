use std::collections::BTreeSet;

use crate::binding::{KeyBinding, KeyMap};

/// Which logical bindings are currently held.
///
/// Tracks held raw keys rather than one flag per binding, so releasing `"w"`
/// while `"ArrowUp"` is still down keeps `MoveForward` active. Only keys the
/// [`KeyMap`] recognizes are ever recorded.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    key_map: KeyMap,
    held: BTreeSet<String>,
}

impl InputState {
    pub fn new(key_map: KeyMap) -> Self {
        Self {
            key_map,
            held: BTreeSet::new(),
        }
    }

    /// Record a key-down (`is_down == true`) or key-up transition.
    ///
    /// Unbound keys are ignored. Repeated downs or ups are no-ops.
    pub fn set_key(&mut self, raw_key: &str, is_down: bool) {
        let Some(binding) = self.key_map.binding_for(raw_key) else {
            tracing::trace!(key = raw_key, "ignoring unbound key");
            return;
        };
        if is_down {
            if self.held.insert(raw_key.to_owned()) {
                tracing::debug!(key = raw_key, %binding, "key down");
            }
        } else if self.held.remove(raw_key) {
            tracing::debug!(key = raw_key, %binding, "key up");
        }
    }

    /// Whether any raw key mapped to `binding` is held.
    pub fn is_active(&self, binding: KeyBinding) -> bool {
        self.key_map
            .keys_for(binding)
            .any(|key| self.held.contains(key))
    }

    pub fn any_active(&self) -> bool {
        !self.held.is_empty()
    }

    /// Release every held key, e.g. when the host window loses focus and will
    /// never deliver the matching key-ups.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            tracing::debug!(count = self.held.len(), "releasing all held keys");
            self.held.clear();
        }
    }

    pub fn held_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.held.iter().map(String::as_str)
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_nothing_held() {
        let state = InputState::default();
        assert!(!state.any_active());
        for binding in KeyBinding::ALL {
            assert!(!state.is_active(binding));
        }
    }

    #[test]
    fn key_down_then_up() {
        let mut state = InputState::default();
        state.set_key("d", true);
        assert!(state.is_active(KeyBinding::MoveRight));
        assert!(!state.is_active(KeyBinding::MoveLeft));
        state.set_key("d", false);
        assert!(!state.is_active(KeyBinding::MoveRight));
    }

    #[test]
    fn repeated_key_down_is_idempotent() {
        let mut once = InputState::default();
        once.set_key("w", true);

        let mut twice = InputState::default();
        twice.set_key("w", true);
        twice.set_key("w", true);

        assert_eq!(
            once.held_keys().collect::<Vec<_>>(),
            twice.held_keys().collect::<Vec<_>>()
        );
        twice.set_key("w", false);
        assert!(!twice.is_active(KeyBinding::MoveForward));
    }

    #[test]
    fn key_up_without_down_is_ignored() {
        let mut state = InputState::default();
        state.set_key("a", false);
        assert!(!state.any_active());
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut state = InputState::default();
        state.set_key("q", true);
        state.set_key("Shift", true);
        state.set_key("W", true);
        assert!(!state.any_active());
        assert_eq!(state.held_keys().count(), 0);
    }

    #[test]
    fn binding_stays_active_while_any_alias_is_held() {
        let mut state = InputState::default();
        state.set_key("w", true);
        state.set_key("ArrowUp", true);
        state.set_key("w", false);
        assert!(state.is_active(KeyBinding::MoveForward));
        state.set_key("ArrowUp", false);
        assert!(!state.is_active(KeyBinding::MoveForward));
    }

    #[test]
    fn latest_transition_wins() {
        let mut state = InputState::default();
        let events = [
            ("s", true),
            ("s", false),
            ("s", true),
            ("ArrowLeft", true),
            ("ArrowLeft", false),
        ];
        for (key, down) in events {
            state.set_key(key, down);
        }
        assert!(state.is_active(KeyBinding::MoveBackward));
        assert!(!state.is_active(KeyBinding::MoveLeft));
    }

    #[test]
    fn release_all_clears_everything() {
        let mut state = InputState::default();
        state.set_key("w", true);
        state.set_key("ArrowLeft", true);
        state.release_all();
        assert!(!state.any_active());
        assert!(!state.is_active(KeyBinding::MoveForward));
    }

    #[test]
    fn custom_key_map_is_honoured() {
        let map = KeyMap::empty().with_alias("i", KeyBinding::MoveForward);
        let mut state = InputState::new(map);
        state.set_key("w", true);
        assert!(!state.is_active(KeyBinding::MoveForward));
        state.set_key("i", true);
        assert!(state.is_active(KeyBinding::MoveForward));
    }
}
