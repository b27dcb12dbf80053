use eventemitter::{EmitterConfig, EventEmitter, Payload};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_logs(f: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = capture.0.lock().unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn named(name: &'static str) -> EventEmitter {
    EventEmitter::with_config(EmitterConfig::default().with_name(name))
}

#[test]
fn registration_and_dispatch_are_traced() {
    let logs = capture_logs(|| {
        let emitter = named("traced");
        emitter.listen("order.created", |_| {});
        emitter.listen_once("order.created", |_| {});
        emitter.emit("order.created", Payload::none());
    });

    assert!(logs.contains("Listener registered"), "{logs}");
    assert!(logs.contains("Event dispatched"), "{logs}");
    assert!(logs.contains("order.created"), "{logs}");
    assert!(logs.contains("traced"), "{logs}");
    assert!(logs.contains("persistent"), "{logs}");
}

#[test]
fn emit_without_listeners_is_traced() {
    let logs = capture_logs(|| {
        named("quiet").emit("nobody.home", Payload::none());
    });

    assert!(logs.contains("Event emitted without listeners"), "{logs}");
    assert!(!logs.contains("Event dispatched"), "{logs}");
}

#[test]
fn removal_and_reset_are_logged() {
    let logs = capture_logs(|| {
        let emitter = named("cleanup");
        emitter.listen("a", |_| {});
        emitter.listen("b", |_| {});
        emitter.remove_event("a");
        emitter.reset();
    });

    assert!(logs.contains("Event removed"), "{logs}");
    assert!(logs.contains("Emitter reset"), "{logs}");
}

#[test]
fn listener_panics_are_not_logged() {
    let logs = capture_logs(|| {
        let emitter = named("silent");
        emitter.listen("boom", |_| panic!("listener failure"));
        emitter.emit("boom", Payload::none());
    });

    assert!(logs.contains("Event dispatched"), "{logs}");
    assert!(!logs.contains("listener failure"), "{logs}");
    assert!(!logs.contains("WARN"), "{logs}");
    assert!(!logs.contains("ERROR"), "{logs}");
}
