//! Explicit registration of a key source with an action table.
//!
//! There is no process-wide listener. [`Listener::register`] hands back a
//! [`ListenerHandle`]; releasing the handle, by [`ListenerHandle::detach`] or
//! by dropping it, detaches the listener and the source with it.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use crossterm::event::{self as term, Event, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::{debug, info, warn};

use crate::dispatch::{ActionTable, dispatch};
use crate::event::KeyEvent;
use crate::keycode::KeyCode;

/// Error type for key sources.
#[derive(Debug)]
pub enum ListenerError {
    /// Terminal IO failure
    Io(std::io::Error),
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "terminal IO error: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

impl From<std::io::Error> for ListenerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Anything that yields key events one at a time.
pub trait KeySource {
    /// Next key press, or `Ok(None)` once the source is exhausted.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, ListenerError>;
}

/// Replays a fixed sequence of events.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    events: VecDeque<KeyEvent>,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Events not yet pulled.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeySource for ScriptedSource {
    fn next_key(&mut self) -> Result<Option<KeyEvent>, ListenerError> {
        Ok(self.events.pop_front())
    }
}

/// Reads key presses from the terminal.
///
/// Holds raw mode from [`TerminalSource::open`] until dropped.
pub struct TerminalSource {
    poll_interval: Duration,
}

impl TerminalSource {
    pub fn open() -> Result<Self, ListenerError> {
        enable_raw_mode()?;
        debug!("raw mode enabled");
        Ok(Self {
            poll_interval: Duration::from_millis(250),
        })
    }
}

impl KeySource for TerminalSource {
    fn next_key(&mut self) -> Result<Option<KeyEvent>, ListenerError> {
        loop {
            if !term::poll(self.poll_interval)? {
                continue;
            }
            match term::read()? {
                Event::Key(key) if is_interrupt(&key) => {
                    info!("interrupted");
                    return Ok(None);
                }
                Event::Key(key) => match KeyEvent::try_from(key) {
                    Ok(event) => return Ok(Some(event)),
                    Err(unmapped) => debug!("{unmapped}"),
                },
                // Resize, focus, mouse and paste carry no key code.
                _ => {}
            }
        }
    }
}

/// Ctrl+C, which raw mode no longer turns into a signal.
fn is_interrupt(key: &term::KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, term::KeyCode::Char('c' | 'C'))
}

impl Drop for TerminalSource {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to restore terminal: {e}");
        }
    }
}

/// Entry point for attaching a source to a table.
pub struct Listener;

impl Listener {
    /// Attach `source` to `table`. Nothing is read until [`ListenerHandle::run`].
    pub fn register<S: KeySource>(source: S, table: ActionTable) -> ListenerHandle<S> {
        info!(bindings = table.len(), "listener registered");
        ListenerHandle {
            source,
            table,
            quit_key: None,
        }
    }
}

/// A registered listener.
pub struct ListenerHandle<S: KeySource> {
    source: S,
    table: ActionTable,
    quit_key: Option<KeyCode>,
}

impl<S: KeySource> ListenerHandle<S> {
    /// Stop [`run`](Self::run) when `code` arrives; that event is not dispatched.
    pub fn quit_on(mut self, code: KeyCode) -> Self {
        self.quit_key = Some(code);
        self
    }

    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    /// Pull and dispatch events until the source runs dry or the quit key
    /// arrives. Returns how many events were dispatched.
    pub fn run(&mut self) -> Result<usize, ListenerError> {
        let mut dispatched = 0;
        while let Some(event) = self.source.next_key()? {
            if Some(event.key_code) == self.quit_key {
                debug!(code = %event.key_code, "quit key received");
                break;
            }
            dispatch(&self.table, &event);
            dispatched += 1;
        }
        Ok(dispatched)
    }

    /// Release the listener, returning its source and table.
    pub fn detach(self) -> (S, ActionTable) {
        info!("listener detached");
        (self.source, self.table)
    }
}
