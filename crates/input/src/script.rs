//! Recorded input: key transitions interleaved with ticks.
//!
//! Grammar, tokens separated by whitespace or commas:
//! ```text
//! +KEY      key down
//! -KEY      key up
//! tick      advance one tick
//! tick*N    advance N ticks
//! ```
//! Example: `+w tick*10 +a tick*5 -w -a tick`.

use crate::state::InputState;

/// One step of an [`InputScript`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    Press(String),
    Release(String),
    Tick(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("token {token:?} names no key")]
    EmptyKey { token: String },
    #[error("token {token:?} has an invalid tick count")]
    BadTickCount { token: String },
    #[error("unrecognized token {token:?}")]
    UnknownToken { token: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    ops: Vec<ScriptOp>,
}

impl InputScript {
    pub fn new(ops: Vec<ScriptOp>) -> Self {
        Self { ops }
    }

    pub fn parse(src: &str) -> Result<Self, ScriptError> {
        let ops = src
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ops })
    }

    pub fn ops(&self) -> &[ScriptOp] {
        &self.ops
    }

    /// Total ticks the script advances.
    pub fn tick_count(&self) -> u64 {
        self.ops
            .iter()
            .map(|op| match op {
                ScriptOp::Tick(n) => u64::from(*n),
                _ => 0,
            })
            .sum()
    }

    /// Feed transitions into `state`, calling `on_tick` once per tick.
    pub fn play<F>(&self, state: &mut InputState, mut on_tick: F)
    where
        F: FnMut(&InputState),
    {
        for op in &self.ops {
            match op {
                ScriptOp::Press(key) => state.set_key(key, true),
                ScriptOp::Release(key) => state.set_key(key, false),
                ScriptOp::Tick(n) => {
                    for _ in 0..*n {
                        on_tick(state);
                    }
                }
            }
        }
    }
}

fn parse_token(token: &str) -> Result<ScriptOp, ScriptError> {
    if let Some(key) = token.strip_prefix('+') {
        return non_empty(key, token).map(ScriptOp::Press);
    }
    if let Some(key) = token.strip_prefix('-') {
        return non_empty(key, token).map(ScriptOp::Release);
    }
    if token == "tick" {
        return Ok(ScriptOp::Tick(1));
    }
    if let Some(count) = token.strip_prefix("tick*") {
        return count
            .parse::<u32>()
            .map(ScriptOp::Tick)
            .map_err(|_| ScriptError::BadTickCount {
                token: token.to_string(),
            });
    }
    Err(ScriptError::UnknownToken {
        token: token.to_string(),
    })
}

fn non_empty(key: &str, token: &str) -> Result<String, ScriptError> {
    if key.is_empty() {
        Err(ScriptError::EmptyKey {
            token: token.to_string(),
        })
    } else {
        Ok(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::resolve;
    use glam::Vec3;

    #[test]
    fn parses_every_token_kind() {
        let script = InputScript::parse("+w tick, tick*3 -w,+ArrowUp").unwrap();
        assert_eq!(
            script.ops(),
            &[
                ScriptOp::Press("w".into()),
                ScriptOp::Tick(1),
                ScriptOp::Tick(3),
                ScriptOp::Release("w".into()),
                ScriptOp::Press("ArrowUp".into()),
            ]
        );
        assert_eq!(script.tick_count(), 4);
    }

    #[test]
    fn empty_source_is_an_empty_script() {
        let script = InputScript::parse("  , ").unwrap();
        assert!(script.ops().is_empty());
        assert_eq!(script.tick_count(), 0);
    }

    #[test]
    fn rejects_bare_sign() {
        assert_eq!(
            InputScript::parse("+w +"),
            Err(ScriptError::EmptyKey { token: "+".into() })
        );
    }

    #[test]
    fn rejects_bad_tick_count() {
        assert!(matches!(
            InputScript::parse("tick*x"),
            Err(ScriptError::BadTickCount { .. })
        ));
        assert!(matches!(
            InputScript::parse("tick*-1"),
            Err(ScriptError::BadTickCount { .. })
        ));
    }

    #[test]
    fn rejects_unknown_token() {
        assert_eq!(
            InputScript::parse("w"),
            Err(ScriptError::UnknownToken { token: "w".into() })
        );
    }

    #[test]
    fn play_applies_transitions_between_ticks() {
        let script = InputScript::parse("+w tick*2 +a tick -w tick").unwrap();
        let mut state = InputState::default();
        let mut deltas = Vec::new();
        script.play(&mut state, |s| deltas.push(resolve(s, 1.0).delta));

        assert_eq!(
            deltas,
            vec![
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(-1.0, 0.0, 1.0),
                Vec3::new(-1.0, 0.0, 0.0),
            ]
        );
        assert!(state.any_active());
    }
}
