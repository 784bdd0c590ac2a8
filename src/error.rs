//! Error types surfaced by listener dispatch.
//!
//! The bus itself has no failure modes: malformed name input and
//! double-removal are tolerated as no-ops (never errors), and the bus never
//! logs or swallows anything on its own. The only error that crosses the API
//! boundary is [`ListenerError`] — a failure raised by a listener and
//! forwarded verbatim to the caller of [`trigger`](crate::EventBus::trigger)
//! or [`trigger_then`](crate::EventBus::trigger_then).

use thiserror::Error;

/// # Failure raised by an event listener.
///
/// Listeners return `Result<R, ListenerError>`; the bus forwards failures to
/// the dispatching caller:
///
/// - [`trigger`](crate::EventBus::trigger) stops at the first failing
///   listener and returns its error, skipping remaining listeners/names.
/// - [`trigger_then`](crate::EventBus::trigger_then) fails the whole
///   aggregate with the first failure; other in-flight results are dropped.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ListenerError {
    /// Listener execution failed.
    #[error("listener failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },
}

impl ListenerError {
    /// Creates a [`ListenerError::Failed`] from any printable message.
    ///
    /// # Example
    /// ```
    /// use signalbus::ListenerError;
    ///
    /// let err = ListenerError::failed("connection refused");
    /// assert_eq!(err.to_string(), "listener failed: connection refused");
    /// ```
    pub fn failed(error: impl Into<String>) -> Self {
        ListenerError::Failed { error: error.into() }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use signalbus::ListenerError;
    ///
    /// let err = ListenerError::failed("boom");
    /// assert_eq!(err.as_label(), "listener_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    ///
    /// # Example
    /// ```
    /// use signalbus::ListenerError;
    ///
    /// let err = ListenerError::failed("boom");
    /// assert_eq!(err.as_message(), "error: boom");
    /// ```
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { error } => format!("error: {error}"),
        }
    }
}
