use crate::error::{EmitterError, Result};
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// The default, untyped event payload.
///
/// Wraps an optional, shared value of any `Send + Sync + 'static` type. The
/// emitter never looks inside it; listeners recover the concrete value with
/// [`Payload::downcast_ref`] or [`Payload::downcast`]. Cloning is a reference
/// count bump.
#[derive(Clone, Default)]
pub struct Payload(Option<Arc<dyn Any + Send + Sync>>);

impl Payload {
    /// Wraps `value` into a new payload.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    /// Wraps an already shared value without re-allocating.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self(Some(value))
    }

    /// An absent payload.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Returns `true` if the payload holds a value of type `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_ref().is_some_and(|value| value.is::<T>())
    }

    /// Borrows the payload as `T`, or `None` if it is absent or of another type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns a shared handle to the payload as `T`.
    ///
    /// # Errors
    /// Returns [`EmitterError::MissingPayload`] if the payload is absent, or
    /// [`EmitterError::TypeMismatch`] if it holds a different type.
    ///
    /// # Examples
    /// ```rust
    /// use eventemitter::Payload;
    ///
    /// # fn main() -> Result<(), eventemitter::EmitterError> {
    /// let payload = Payload::new(42_u64);
    /// assert_eq!(*payload.downcast::<u64>()?, 42);
    /// assert!(payload.downcast::<String>().is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        let value = self.0.clone().ok_or_else(|| EmitterError::MissingPayload {
            message: type_name::<T>().into(),
            context: None,
        })?;

        value.downcast::<T>().map_err(|_| EmitterError::TypeMismatch {
            message: type_name::<T>().into(),
            context: Some("Unexpected payload type".into()),
        })
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Payload(..)"),
            None => f.write_str("Payload(None)"),
        }
    }
}
