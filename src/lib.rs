//! Keyboard-event dispatch through a typed lookup table, and an anagram check.
//!
//! The [`dispatch`] module maps a [`KeyCode`] to a zero-argument action and
//! invokes it if one is bound. The [`anagram`] module compares the character
//! multisets of two strings.

pub mod anagram;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod event;
pub mod keycode;
pub mod listener;
pub mod logging;

pub use anagram::is_anagram;
pub use dispatch::{Action, ActionTable, dispatch, switch_dispatch};
pub use event::KeyEvent;
pub use keycode::KeyCode;
