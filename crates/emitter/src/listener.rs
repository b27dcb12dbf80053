use crate::payload::Payload;
use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A registered callback.
///
/// Identity is per registration: the same closure registered twice yields two
/// independent entries.
pub(crate) type Listener<P = Payload> = Arc<dyn Fn(&P) + Send + Sync + 'static>;

/// Which table a listener lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Fires on every emit until the event is removed or the emitter reset.
    Persistent,
    /// Fires on the next emit only.
    Once,
}

impl ListenerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Persistent => "persistent",
            Self::Once => "once",
        }
    }
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calls `listener` behind its own unwind boundary and discards any panic.
pub(crate) fn invoke<P>(listener: &Listener<P>, payload: &P) {
    if let Err(cause) = panic::catch_unwind(AssertUnwindSafe(|| listener(payload))) {
        release(cause);
    }
}

/// Drops `value` behind an unwind boundary.
///
/// Panic payloads and captured listener state run arbitrary `Drop` code. If
/// that code panics, the secondary payload is leaked rather than dropped.
pub(crate) fn release<T>(value: T) {
    if let Err(cause) = panic::catch_unwind(AssertUnwindSafe(move || drop(value))) {
        mem::forget(cause);
    }
}
