use eventemitter::Payload;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Counts how many times its listeners were called.
#[derive(Debug, Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self) -> impl Fn(&Payload) + Send + Sync + 'static {
        let hits = Arc::clone(&self.0);
        move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Records the label of every listener call, in call order.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self, label: &'static str) -> impl Fn(&Payload) + Send + Sync + 'static {
        let entries = Arc::clone(&self.0);
        move |_| entries.lock().unwrap().push(label)
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

/// A listener that always panics.
pub fn panicking(_: &Payload) {
    panic!("listener failure");
}

/// A value whose destructor panics.
#[derive(Debug)]
pub struct PanicOnDrop;

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        panic!("drop failure");
    }
}

/// A listener that panics with a payload whose destructor panics too.
pub fn panicking_with_bomb(_: &Payload) {
    std::panic::panic_any(PanicOnDrop);
}

/// A listener owning state whose destructor panics.
pub fn holding_bomb() -> impl Fn(&Payload) + Send + Sync + 'static {
    let bomb = PanicOnDrop;
    move |_| {
        let _ = &bomb;
    }
}
