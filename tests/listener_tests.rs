use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use switch_critique::config::BindingsConfig;
use switch_critique::listener::{KeySource, Listener, ListenerError, ScriptedSource};
use switch_critique::{ActionTable, KeyCode, KeyEvent};

/// Default bindings wired to a shared log of emitted messages.
fn recording_table() -> (ActionTable, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let table = BindingsConfig::default()
        .action_table(Arc::new(move |msg: &str| log.lock().unwrap().push(msg.to_string())));
    (table, seen)
}

fn events(codes: &[u32]) -> ScriptedSource {
    ScriptedSource::new(codes.iter().copied().map(KeyEvent::new))
}

#[test]
fn test_run_dispatches_until_source_is_exhausted() {
    let (table, seen) = recording_table();
    let mut handle = Listener::register(events(&[32, 999, 13, 8]), table);

    let count = handle.run().unwrap();

    assert_eq!(count, 4);
    assert_eq!(*seen.lock().unwrap(), vec!["space", "enter", "backspace"]);
}

#[test]
fn test_quit_key_stops_without_dispatch() {
    let (mut table, seen) = recording_table();
    let quit_seen = Arc::clone(&seen);
    table.insert(KeyCode::ESCAPE, move || {
        quit_seen.lock().unwrap().push("escape".to_string())
    });

    let mut handle = Listener::register(events(&[32, 27, 13]), table).quit_on(KeyCode::ESCAPE);

    assert_eq!(handle.run().unwrap(), 1);
    assert_eq!(*seen.lock().unwrap(), vec!["space"]);

    let (source, _table) = handle.detach();
    assert_eq!(source.remaining(), 1);
}

#[test]
fn test_run_resumes_after_quit() {
    let (table, seen) = recording_table();
    let mut handle = Listener::register(events(&[32, 27, 13]), table).quit_on(KeyCode::ESCAPE);

    assert_eq!(handle.run().unwrap(), 1);
    assert_eq!(handle.run().unwrap(), 1);
    assert_eq!(*seen.lock().unwrap(), vec!["space", "enter"]);
}

#[test]
fn test_detach_returns_table_intact() {
    let (table, seen) = recording_table();
    let handle = Listener::register(events(&[32]), table);

    assert_eq!(handle.table().len(), 3);
    let (mut source, table) = handle.detach();

    assert!(table.contains(KeyCode::SPACE));
    assert!(!table.contains(KeyCode::ESCAPE));
    assert_eq!(
        table.codes(),
        vec![KeyCode::BACKSPACE, KeyCode::ENTER, KeyCode::SPACE]
    );
    // nothing was pulled or dispatched
    assert_eq!(source.next_key().unwrap(), Some(KeyEvent::new(32)));
    assert!(seen.lock().unwrap().is_empty());
}

struct FailingSource;

impl KeySource for FailingSource {
    fn next_key(&mut self) -> Result<Option<KeyEvent>, ListenerError> {
        Err(std::io::Error::other("terminal gone").into())
    }
}

#[test]
fn test_source_errors_propagate() {
    let (table, _seen) = recording_table();
    let mut handle = Listener::register(FailingSource, table);

    let err = handle.run().unwrap_err();
    assert!(err.to_string().contains("terminal gone"));
}

/// Source that records when it is released.
struct TrackedSource {
    inner: ScriptedSource,
    released: Arc<AtomicBool>,
}

impl KeySource for TrackedSource {
    fn next_key(&mut self) -> Result<Option<KeyEvent>, ListenerError> {
        self.inner.next_key()
    }
}

impl Drop for TrackedSource {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_dropping_handle_releases_source() {
    let (table, seen) = recording_table();
    let released = Arc::new(AtomicBool::new(false));
    let source = TrackedSource {
        inner: events(&[32, 13]),
        released: Arc::clone(&released),
    };

    {
        let mut handle = Listener::register(source, table);
        assert_eq!(handle.run().unwrap(), 2);
        assert!(!released.load(Ordering::SeqCst));
    }

    assert!(released.load(Ordering::SeqCst));
    assert_eq!(*seen.lock().unwrap(), vec!["space", "enter"]);
}
