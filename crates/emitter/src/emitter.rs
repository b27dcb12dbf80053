use crate::config::EmitterConfig;
use crate::listener::{self, Listener, ListenerKind};
use crate::payload::Payload;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type Table<P> = FxHashMap<Cow<'static, str>, Vec<Listener<P>>>;

/// Both listener tables, always locked together.
struct Tables<P> {
    persistent: Table<P>,
    once: Table<P>,
}

impl<P> Tables<P> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            persistent: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            once: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    const fn table(&self, kind: ListenerKind) -> &Table<P> {
        match kind {
            ListenerKind::Persistent => &self.persistent,
            ListenerKind::Once => &self.once,
        }
    }

    const fn table_mut(&mut self, kind: ListenerKind) -> &mut Table<P> {
        match kind {
            ListenerKind::Persistent => &mut self.persistent,
            ListenerKind::Once => &mut self.once,
        }
    }

    fn count(&self, event: &str, kind: ListenerKind) -> usize {
        self.table(kind).get(event).map_or(0, Vec::len)
    }

    fn event_count(&self) -> usize {
        self.persistent.keys().chain(self.once.keys()).collect::<BTreeSet<_>>().len()
    }

    fn into_listeners(self) -> impl Iterator<Item = Listener<P>> {
        self.persistent.into_values().chain(self.once.into_values()).flatten()
    }
}

/// A synchronous, thread-safe registry of named-event listeners.
///
/// Listeners are either persistent ([`EventEmitter::listen`]) or one-shot
/// ([`EventEmitter::listen_once`]). [`EventEmitter::emit`] snapshots the
/// listeners of an event under the write lock, clears its one-shot table,
/// releases the lock and only then calls every listener on the current thread:
/// persistent ones first, then one-shot ones, each group in registration order.
/// A panicking listener is isolated and never stops its siblings.
///
/// Cloning is cheap and every clone shares the same tables, so listeners may
/// capture a handle and re-enter the emitter.
///
/// # Example
///
/// ```rust
/// use eventemitter::{EventEmitter, Payload};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let emitter = EventEmitter::new();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&hits);
/// emitter.listen("user.created", move |payload: &Payload| {
///     if let Some(id) = payload.downcast_ref::<u64>() {
///         counter.fetch_add(usize::try_from(*id).unwrap_or(0), Ordering::SeqCst);
///     }
/// });
///
/// emitter.emit("user.created", Payload::new(3_u64));
/// assert_eq!(hits.load(Ordering::SeqCst), 3);
/// ```
pub struct EventEmitter<P = Payload> {
    tables: Arc<RwLock<Tables<P>>>,
    config: Arc<EmitterConfig>,
}

impl EventEmitter {
    /// Creates an empty emitter with the default configuration and the
    /// untyped [`Payload`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P> Default for EventEmitter<P> {
    fn default() -> Self {
        Self::with_config(EmitterConfig::default())
    }
}

impl<P> Clone for EventEmitter<P> {
    fn clone(&self) -> Self {
        Self { tables: Arc::clone(&self.tables), config: Arc::clone(&self.config) }
    }
}

impl<P> fmt::Debug for EventEmitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("EventEmitter")
            .field("name", &self.config.name())
            .field("persistent", &tables.persistent.len())
            .field("once", &tables.once.len())
            .finish()
    }
}

impl<P> EventEmitter<P> {
    /// Creates an empty emitter for payloads of type `P`.
    #[must_use]
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::with_capacity(config.capacity()))),
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Registers `listener` for every future emit of `event`.
    pub fn listen<F>(&self, event: impl Into<Cow<'static, str>>, listener: F)
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.register(ListenerKind::Persistent, event.into(), Arc::new(listener));
    }

    /// Registers `listener` for the next emit of `event` only.
    pub fn listen_once<F>(&self, event: impl Into<Cow<'static, str>>, listener: F)
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.register(ListenerKind::Once, event.into(), Arc::new(listener));
    }

    /// Calls every listener registered for `event` with `payload`.
    ///
    /// The one-shot table for `event` is cleared even when nothing was
    /// registered. Listeners added while this call runs take effect on the
    /// next emit.
    #[allow(clippy::needless_pass_by_value)]
    pub fn emit(&self, event: &str, payload: P) {
        let (persistent, once) = {
            let mut tables = self.tables.write();
            let persistent = tables.persistent.get(event).cloned().unwrap_or_default();
            let once = tables.once.remove(event).unwrap_or_default();
            (persistent, once)
        };

        if persistent.is_empty() && once.is_empty() {
            trace!(emitter = self.config.name(), event, "Event emitted without listeners");
            return;
        }

        trace!(
            emitter = self.config.name(),
            event,
            persistent = persistent.len(),
            once = once.len(),
            "Event dispatched"
        );

        // The snapshot may hold the last handle to a listener.
        for listener in persistent.into_iter().chain(once) {
            listener::invoke(&listener, &payload);
            listener::release(listener);
        }
    }

    /// Drops every listener of `event`, persistent and one-shot.
    ///
    /// Emits that already took their snapshot still run to completion.
    pub fn remove_event(&self, event: &str) {
        let removed: Vec<_> = {
            let mut tables = self.tables.write();
            let persistent = tables.persistent.remove(event);
            let once = tables.once.remove(event);
            persistent.into_iter().chain(once).flatten().collect()
        };

        debug!(emitter = self.config.name(), event, removed = removed.len(), "Event removed");
        removed.into_iter().for_each(listener::release);
    }

    /// Drops every listener of every event.
    pub fn reset(&self) {
        let previous = {
            let mut tables = self.tables.write();
            std::mem::replace(&mut *tables, Tables::with_capacity(self.config.capacity()))
        };

        debug!(emitter = self.config.name(), events = previous.event_count(), "Emitter reset");
        previous.into_listeners().for_each(listener::release);
    }

    /// Number of listeners of both kinds currently registered for `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        let tables = self.tables.read();
        tables.count(event, ListenerKind::Persistent) + tables.count(event, ListenerKind::Once)
    }

    /// Number of listeners of `kind` currently registered for `event`.
    #[must_use]
    pub fn listener_count_of(&self, event: &str, kind: ListenerKind) -> usize {
        self.tables.read().count(event, kind)
    }

    #[must_use]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Sorted names of every event with at least one registered listener.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        let tables = self.tables.read();
        tables
            .persistent
            .keys()
            .chain(tables.once.keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let tables = self.tables.read();
        tables.persistent.is_empty() && tables.once.is_empty()
    }

    fn register(&self, kind: ListenerKind, event: Cow<'static, str>, listener: Listener<P>) {
        let listeners = {
            let mut tables = self.tables.write();
            let entry = tables.table_mut(kind).entry(event.clone()).or_default();
            entry.push(listener);
            entry.len()
        };

        trace!(
            emitter = self.config.name(),
            event = &*event,
            kind = kind.as_str(),
            listeners,
            "Listener registered"
        );
    }
}
