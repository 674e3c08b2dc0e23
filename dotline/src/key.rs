//! Logical key events produced by the key decoder.

use core::fmt;

/// Key without modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    /// Wildcard entry in a keymap. Never produced by the decoder.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Modifier {
    #[default]
    None,
    Ctrl,
}

/// A key press. Two keys are equal only when both code and modifier
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifier: Modifier,
}

/// Fallback entry consulted when a mode has no binding for a key.
pub const DEFAULT_BINDING: Key = Key::new(KeyCode::Default, Modifier::None);

impl Key {
    pub const fn new(code: KeyCode, modifier: Modifier) -> Self {
        Self { code, modifier }
    }

    /// Named or printable key without modifier
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifier::None)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Control chord, written the way terminals encode it: `Key::ctrl('D')`
    /// for Ctrl-D, `Key::ctrl('[')` for Escape.
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifier::Ctrl)
    }

    /// Character this key inserts into the buffer, if any.
    pub fn printable(&self) -> Option<char> {
        match (self.code, self.modifier) {
            (KeyCode::Char(c), Modifier::None) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier == Modifier::Ctrl {
            f.write_str("Ctrl-")?;
        }

        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Default => f.write_str("Default"),
            code => write!(f, "{code:?}"),
        }
    }
}
