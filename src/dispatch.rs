//! Key-code dispatch through a lookup table.
//!
//! [`dispatch`] replaces a hard-coded `match` over key codes with a single
//! typed hash lookup into an [`ActionTable`]. [`switch_dispatch`] keeps the
//! `match` form around for comparison.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::config::Binding;
use crate::event::KeyEvent;
use crate::keycode::KeyCode;

/// Zero-argument, side-effecting callback bound to a key.
pub type Action = Box<dyn Fn() + Send + Sync>;

/// Receiver for the messages emitted by actions built from bindings.
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// Mapping from key code to the single action registered for it.
#[derive(Default)]
pub struct ActionTable {
    actions: HashMap<KeyCode, Action>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one action per binding, each passing its message to `sink`.
    pub fn from_bindings(bindings: &[Binding], sink: Sink) -> Self {
        bindings
            .iter()
            .map(|binding| {
                let sink = Arc::clone(&sink);
                let message = binding.message.clone();
                (binding.code, move || sink(message.as_str()))
            })
            .collect()
    }

    /// Register `action` for `code`, returning true if it replaced another.
    pub fn insert<F>(&mut self, code: KeyCode, action: F) -> bool
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.actions.insert(code, Box::new(action)).is_some()
    }

    pub fn get(&self, code: KeyCode) -> Option<&Action> {
        self.actions.get(&code)
    }

    pub fn contains(&self, code: KeyCode) -> bool {
        self.actions.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered codes in ascending order.
    pub fn codes(&self) -> Vec<KeyCode> {
        let mut codes: Vec<KeyCode> = self.actions.keys().copied().collect();
        codes.sort_unstable();
        codes
    }
}

impl<F> FromIterator<(KeyCode, F)> for ActionTable
where
    F: Fn() + Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = (KeyCode, F)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (code, action) in iter {
            table.insert(code, action);
        }
        table
    }
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTable")
            .field("codes", &self.codes())
            .finish()
    }
}

/// Invoke the action registered for the event's key code, if any.
///
/// An unregistered code is a no-op. Actions are called with no arguments;
/// anything they do, including panicking, is their own business.
pub fn dispatch(actions: &ActionTable, event: &KeyEvent) {
    match actions.get(event.key_code) {
        Some(action) => {
            trace!(code = %event.key_code, "dispatching");
            action();
        }
        None => trace!(code = %event.key_code, "no action bound"),
    }
}

/// Hard-coded dispatch over the built-in keys.
///
/// Returns the message the matching handler would emit.
pub fn switch_dispatch(event: &KeyEvent) -> Option<&'static str> {
    match event.key_code {
        KeyCode::SPACE => Some("space"),
        KeyCode::BACKSPACE => Some("backspace"),
        KeyCode::ENTER => Some("enter"),
        _ => None,
    }
}
