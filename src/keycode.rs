//! Typed key identifiers shared by action tables and key events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A discrete key code in the DOM `keyCode` numbering.
///
/// Both [`ActionTable`](crate::dispatch::ActionTable) keys and
/// [`KeyEvent::key_code`](crate::event::KeyEvent::key_code) use this type, so a
/// table lookup always compares like with like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const ENTER: Self = Self(13);
    pub const ESCAPE: Self = Self(27);
    pub const SPACE: Self = Self(32);
    pub const PAGE_UP: Self = Self(33);
    pub const PAGE_DOWN: Self = Self(34);
    pub const END: Self = Self(35);
    pub const HOME: Self = Self(36);
    pub const LEFT: Self = Self(37);
    pub const UP: Self = Self(38);
    pub const RIGHT: Self = Self(39);
    pub const DOWN: Self = Self(40);
    pub const INSERT: Self = Self(45);
    pub const DELETE: Self = Self(46);

    /// Code for function key `F{n}`, for `n` in 1..=12.
    pub fn function(n: u8) -> Option<Self> {
        (1..=12).contains(&n).then(|| Self(111 + u32::from(n)))
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for KeyCode {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_keys_follow_dom_numbering() {
        assert_eq!(KeyCode::function(1), Some(KeyCode(112)));
        assert_eq!(KeyCode::function(12), Some(KeyCode(123)));
        assert_eq!(KeyCode::function(0), None);
        assert_eq!(KeyCode::function(13), None);
    }

    #[test]
    fn parses_integer_text() {
        assert_eq!(" 32 ".parse::<KeyCode>().unwrap(), KeyCode::SPACE);
        assert!("space".parse::<KeyCode>().is_err());
    }
}
