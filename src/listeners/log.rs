//! # Simple logging listener for debugging and demos.
//!
//! [`LogListener`] prints every event it receives to stdout in a
//! human-readable format. This is primarily useful for development,
//! debugging, and examples.
//!
//! ## Output format
//! ```text
//! [fired] args="payload"
//! ```

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::listeners::listener::Listen;

/// Simple stdout logging listener.
///
/// Enabled via the `logging` feature. Prints the dispatched arguments to
/// stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom
/// [`Listen`](crate::Listen) for structured logging or metrics collection.
pub struct LogListener;

#[async_trait]
impl<A> Listen<A, ()> for LogListener
where
    A: Debug + Send + 'static,
{
    async fn call(&self, args: A) -> Result<(), ListenerError> {
        println!("[fired] args={args:?}");
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
