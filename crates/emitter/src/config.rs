use std::borrow::Cow;

/// Label used when no name (or a blank one) is configured.
pub const DEFAULT_NAME: &str = "event-emitter";
/// Upper bound for the initial capacity hint of the listener tables.
pub const MAX_CAPACITY: usize = 4096;

/// Configuration for an [`EventEmitter`](crate::EventEmitter).
///
/// Values are normalized on the way in, so a config is always valid.
///
/// # Examples
/// ```rust
/// use eventemitter::{EmitterConfig, EventEmitter, Payload};
///
/// let config = EmitterConfig::default().with_name("orders").with_capacity(32);
/// let emitter = EventEmitter::<Payload>::with_config(config);
/// assert_eq!(emitter.config().name(), "orders");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    name: Cow<'static, str>,
    capacity: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self { name: Cow::Borrowed(DEFAULT_NAME), capacity: 0 }
    }
}

impl EmitterConfig {
    /// Sets the label attached to every log record of the emitter.
    #[must_use = "Customize the emitter label used in log records"]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        self.name = if name.trim().is_empty() { Cow::Borrowed(DEFAULT_NAME) } else { name };
        self
    }

    /// Pre-sizes the listener tables for roughly `capacity` distinct event names.
    #[must_use = "Customize the initial capacity of the listener tables"]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.min(MAX_CAPACITY);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
