//! # Event Emitter
//!
//! A synchronous, thread-safe, in-process publish/subscribe registry.
//!
//! ## Overview
//!
//! Callers register listeners under an event name, either persistent
//! ([`EventEmitter::listen`]) or one-shot ([`EventEmitter::listen_once`]), and
//! later [`EventEmitter::emit`] the event with a payload. Every listener runs
//! on the emitting thread.
//!
//! ## Features
//!
//! * **Snapshot dispatch**: the lock is released before any listener runs, so
//!   listeners may register, emit or remove events themselves.
//! * **Once semantics**: one-shot listeners fire at most once, even under
//!   concurrent emits.
//! * **Fault isolation**: a panicking listener is contained and never stops
//!   the remaining ones or the caller.
//! * **High Performance**: `FxHashMap` + `parking_lot::RwLock`.
//! * **Opaque payloads**: [`Payload`] carries any `Send + Sync` value; typed
//!   emitters are available through [`EventEmitter::with_config`].
//!
//! # Example
//!
//! ```rust
//! use eventemitter::{EventEmitter, Payload};
//! use std::sync::{Arc, Mutex};
//!
//! let emitter = EventEmitter::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! emitter.listen_once("greeting", move |payload: &Payload| {
//!     if let Some(text) = payload.downcast_ref::<&str>() {
//!         sink.lock().unwrap().push(*text);
//!     }
//! });
//!
//! emitter.emit("greeting", Payload::new("oi"));
//! emitter.emit("greeting", Payload::new("again"));
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["oi"]);
//! ```

mod config;
mod emitter;
mod error;
mod listener;
mod payload;

pub use config::{DEFAULT_NAME, EmitterConfig, MAX_CAPACITY};
pub use emitter::EventEmitter;
pub use error::{EmitterError, EmitterErrorExt, Result};
pub use listener::ListenerKind;
pub use payload::Payload;

use std::sync::OnceLock;

static GLOBAL_EMITTER: OnceLock<EventEmitter> = OnceLock::new();

/// Access the lazily initialized process-wide emitter.
///
/// Every call returns the same instance. Embedders that prefer scoped
/// lifetimes should create their own [`EventEmitter`] instead.
#[must_use]
pub fn global() -> &'static EventEmitter {
    GLOBAL_EMITTER
        .get_or_init(|| EventEmitter::with_config(EmitterConfig::default().with_name("global")))
}
