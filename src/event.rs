//! Key events as seen by the dispatcher, and their terminal counterparts.

use std::fmt;

use crossterm::event::{self as term, KeyEventKind};

use crate::keycode::KeyCode;

/// A single key press, produced by an input source.
///
/// The dispatcher only reads `key_code`; it never mutates the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key_code: KeyCode,
}

impl KeyEvent {
    pub fn new(key_code: u32) -> Self {
        Self {
            key_code: KeyCode(key_code),
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(key_code: KeyCode) -> Self {
        Self { key_code }
    }
}

/// A terminal key with no DOM key code, or a non-press event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedKey(pub term::KeyCode);

impl fmt::Display for UnmappedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no key code for terminal key {:?}", self.0)
    }
}

impl std::error::Error for UnmappedKey {}

impl TryFrom<term::KeyEvent> for KeyEvent {
    type Error = UnmappedKey;

    fn try_from(key: term::KeyEvent) -> Result<Self, Self::Error> {
        // Windows reports releases too; only presses are dispatched.
        if key.kind != KeyEventKind::Press {
            return Err(UnmappedKey(key.code));
        }
        terminal_key_code(key.code)
            .map(Self::from)
            .ok_or(UnmappedKey(key.code))
    }
}

/// Whether some terminal key press converts to `code`.
pub fn is_terminal_key_code(code: KeyCode) -> bool {
    matches!(
        code.0,
        8 | 9 | 13 | 27 | 32..=40 | 45 | 46 | 48..=57 | 65..=90 | 112..=123
    )
}

fn terminal_key_code(code: term::KeyCode) -> Option<KeyCode> {
    let mapped = match code {
        term::KeyCode::Backspace => KeyCode::BACKSPACE,
        term::KeyCode::Tab | term::KeyCode::BackTab => KeyCode::TAB,
        term::KeyCode::Enter => KeyCode::ENTER,
        term::KeyCode::Esc => KeyCode::ESCAPE,
        term::KeyCode::PageUp => KeyCode::PAGE_UP,
        term::KeyCode::PageDown => KeyCode::PAGE_DOWN,
        term::KeyCode::End => KeyCode::END,
        term::KeyCode::Home => KeyCode::HOME,
        term::KeyCode::Left => KeyCode::LEFT,
        term::KeyCode::Up => KeyCode::UP,
        term::KeyCode::Right => KeyCode::RIGHT,
        term::KeyCode::Down => KeyCode::DOWN,
        term::KeyCode::Insert => KeyCode::INSERT,
        term::KeyCode::Delete => KeyCode::DELETE,
        term::KeyCode::F(n) => return KeyCode::function(n),
        term::KeyCode::Char(' ') => KeyCode::SPACE,
        term::KeyCode::Char(c) if c.is_ascii_digit() => KeyCode(u32::from(c)),
        term::KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            KeyCode(u32::from(c.to_ascii_uppercase()))
        }
        _ => return None,
    };
    Some(mapped)
}
