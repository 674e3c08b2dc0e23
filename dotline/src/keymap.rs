//! Per-mode key bindings.
//!
//! A [`Keymap`] is built once and handed to the editor. Lookups never
//! mutate it.

use alloc::collections::BTreeMap;
use core::fmt;

use num_enum::IntoPrimitive;

use crate::builtins::Builtin;
use crate::key::{Key, KeyCode, DEFAULT_BINDING};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, IntoPrimitive)]
#[repr(u8)]
pub enum Mode {
    #[default]
    Insert,
    Command,
    Completing,
}

impl Mode {
    pub(crate) const COUNT: usize = 3;

    pub(crate) fn index(self) -> usize {
        u8::from(self) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapError {
    /// The mode has no table at all
    NoTable(Mode),
    /// Key is unbound and the mode has no default entry
    Unbound(Mode, Key),
}

impl fmt::Display for KeymapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeymapError::NoTable(mode) => write!(f, "No binding for {mode:?} mode"),
            KeymapError::Unbound(mode, key) => write!(f, "No binding for {key} in {mode:?} mode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    modes: BTreeMap<Mode, BTreeMap<Key, Builtin>>,
}

impl Keymap {
    /// Keymap without any mode tables
    pub fn empty() -> Self {
        Self {
            modes: BTreeMap::new(),
        }
    }

    /// Add a binding, creating the mode's table if needed. Use
    /// [`DEFAULT_BINDING`] as key to set the mode's fallback.
    pub fn bind(mut self, mode: Mode, key: Key, builtin: Builtin) -> Self {
        self.modes.entry(mode).or_default().insert(key, builtin);
        self
    }

    /// Drop a mode's whole table.
    pub fn without_mode(mut self, mode: Mode) -> Self {
        self.modes.remove(&mode);
        self
    }

    /// Exact match first, then the mode's default entry.
    pub fn lookup(&self, mode: Mode, key: Key) -> Result<Builtin, KeymapError> {
        let table = self.modes.get(&mode).ok_or(KeymapError::NoTable(mode))?;

        table
            .get(&key)
            .or_else(|| table.get(&DEFAULT_BINDING))
            .copied()
            .ok_or(KeymapError::Unbound(mode, key))
    }
}

impl Default for Keymap {
    fn default() -> Self {
        use Builtin::*;
        use Mode::*;

        Self::empty()
            .bind(Command, Key::char('i'), InsertMode)
            .bind(Command, Key::char('h'), MoveDotB)
            .bind(Command, Key::char('l'), MoveDotF)
            .bind(Command, Key::char('D'), KillLineF)
            .bind(Command, DEFAULT_BINDING, DefaultCommand)
            .bind(Insert, Key::ctrl('['), CommandMode)
            .bind(Insert, Key::ctrl('U'), KillLineB)
            .bind(Insert, Key::ctrl('K'), KillLineF)
            .bind(Insert, Key::plain(KeyCode::Backspace), KillRuneB)
            .bind(Insert, Key::plain(KeyCode::Left), MoveDotB)
            .bind(Insert, Key::plain(KeyCode::Right), MoveDotF)
            .bind(Insert, Key::plain(KeyCode::Enter), AcceptLine)
            .bind(Insert, Key::plain(KeyCode::Tab), Complete)
            .bind(Insert, Key::ctrl('D'), ReturnEof)
            .bind(Insert, DEFAULT_BINDING, DefaultInsert)
            .bind(Completing, Key::ctrl('['), CancelCompletion)
            .bind(Completing, Key::plain(KeyCode::Up), SelectCandB)
            .bind(Completing, Key::plain(KeyCode::Down), SelectCandF)
            .bind(Completing, Key::plain(KeyCode::Tab), CycleCandF)
            .bind(Completing, DEFAULT_BINDING, DefaultCompleting)
    }
}
