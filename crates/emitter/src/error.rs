use std::borrow::Cow;

/// Errors returned by the fallible helpers around the emitter.
///
/// Registry operations themselves never fail; this type only surfaces from
/// payload extraction.
#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    /// The payload holds a value of a different type than the one requested.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The payload was emitted without a value.
    #[error("Missing payload{}: {message}", format_context(.context))]
    MissingPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// A specialized result type for emitter helpers.
pub type Result<T> = std::result::Result<T, EmitterError>;

/// Adds `.context(...)` to any [`Result`] carrying an [`EmitterError`].
pub trait EmitterErrorExt<T> {
    /// Attaches a human-readable context to the error, replacing any previous one.
    ///
    /// # Errors
    /// Returns the original error with the context attached.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> EmitterErrorExt<T> for Result<T> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                EmitterError::TypeMismatch { context: c, .. }
                | EmitterError::MissingPayload { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
