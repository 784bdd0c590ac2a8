//! # Listener abstraction.
//!
//! This module defines the [`Listen`] trait (async callback invoked on
//! dispatch) and the common handle type [`ListenerRef`], an
//! `Arc<dyn Listen>` suitable for registering under several event names and
//! for later identity-based removal.
//!
//! ## Identity
//! The bus compares listeners by `Arc` pointer identity. Keep the
//! `ListenerRef` you registered if you intend to remove it later with
//! [`off`](crate::EventBus::off) — a freshly built listener is never equal
//! to an existing one, even when backed by the same function.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ListenerError;

/// Shared listener handle used throughout the bus.
pub type ListenerRef<A = (), R = ()> = Arc<dyn Listen<A, R>>;

/// # Asynchronous event listener.
///
/// A listener receives the trigger arguments (`A`, cloned per invocation)
/// and produces a value (`R`) collected by
/// [`trigger_then`](crate::EventBus::trigger_then), or a [`ListenerError`]
/// forwarded to the dispatching caller.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use signalbus::{Listen, ListenerError};
///
/// struct Doubler;
///
/// #[async_trait]
/// impl Listen<u32, u32> for Doubler {
///     fn name(&self) -> &str { "doubler" }
///
///     async fn call(&self, n: u32) -> Result<u32, ListenerError> {
///         Ok(n * 2)
///     }
/// }
/// ```
#[async_trait]
pub trait Listen<A = (), R = ()>: Send + Sync + 'static {
    /// Handles one dispatched event.
    ///
    /// Called on the dispatching task, never in parallel with itself for a
    /// single `trigger` call. Return `Err` to abort the surrounding
    /// dispatch; the bus forwards the error without logging it.
    async fn call(&self, args: A) -> Result<R, ListenerError>;

    /// Returns the listener name used in diagnostics.
    ///
    /// Prefer short, descriptive names (e.g., "audit", "cache-invalidate").
    /// The default uses `type_name::<Self>()`, which can be verbose -
    /// override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
