//! Input abstraction for headless runs
//!
//! A real front end would turn key events into [`Action`]s. Without one, a
//! [`ScriptedInput`] replays a fixed key script, looping when it runs out.

use std::collections::VecDeque;
use std::str::FromStr;
use thiserror::Error;

/// One player decision for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move { dx: i32, dy: i32 },
    Wait,
}

impl Action {
    /// Roguelike key bindings: `hjkl` orthogonal, `yubn` diagonal, `.` wait.
    pub fn from_key(key: char) -> Option<Self> {
        let (dx, dy) = match key {
            'h' => (-1, 0),
            'l' => (1, 0),
            'k' => (0, -1),
            'j' => (0, 1),
            'y' => (-1, -1),
            'u' => (1, -1),
            'b' => (-1, 1),
            'n' => (1, 1),
            '.' => return Some(Action::Wait),
            _ => return None,
        };
        Some(Action::Move { dx, dy })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown key {key:?} at position {position}")]
    UnknownKey { key: char, position: usize },
}

/// Cyclic queue of scripted actions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<Action>,
    script: Vec<Action>,
}

impl ScriptedInput {
    pub fn new(script: Vec<Action>) -> Self {
        Self {
            pending: script.iter().copied().collect(),
            script,
        }
    }

    /// Parse a key script. Whitespace is ignored.
    pub fn parse(keys: &str) -> Result<Self, InputError> {
        let script = keys
            .chars()
            .enumerate()
            .filter(|(_, key)| !key.is_whitespace())
            .map(|(position, key)| {
                Action::from_key(key).ok_or(InputError::UnknownKey { key, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(script))
    }

    /// Next action; [`Action::Wait`] when the script is empty.
    pub fn next_action(&mut self) -> Action {
        if self.pending.is_empty() {
            self.pending.extend(self.script.iter().copied());
        }
        self.pending.pop_front().unwrap_or(Action::Wait)
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl FromStr for ScriptedInput {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
