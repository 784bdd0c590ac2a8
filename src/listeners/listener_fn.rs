//! # Function-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(A) -> Fut`, producing a fresh
//! future per invocation. This avoids shared mutable state between
//! dispatches; if shared state is needed, capture an `Arc<...>` explicitly
//! inside the closure.
//!
//! ## Example
//! ```rust
//! use signalbus::{ListenerFn, ListenerRef, ListenerError};
//!
//! let l: ListenerRef<u32, u32> = ListenerFn::arc("double", |n: u32| async move {
//!     Ok::<_, ListenerError>(n * 2)
//! });
//!
//! assert_eq!(l.name(), "double");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::listeners::listener::Listen;

/// Function-backed listener implementation.
///
/// Wraps a closure that *creates* a new future per invocation.
#[derive(Debug)]
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenerFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a
    /// [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the listener and returns it as a shared handle (`Arc<Self>`).
    ///
    /// ## Example
    /// ```rust
    /// use signalbus::{ListenerFn, ListenerRef, ListenerError};
    ///
    /// let l: ListenerRef = ListenerFn::arc("hello", |_: ()| async {
    ///     Ok::<_, ListenerError>(())
    /// });
    /// assert_eq!(l.name(), "hello");
    /// ```
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<A, R, F, Fut> Listen<A, R> for ListenerFn<F>
where
    A: Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<R, ListenerError>> + Send + 'static,
{
    async fn call(&self, args: A) -> Result<R, ListenerError> {
        (self.f)(args).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
