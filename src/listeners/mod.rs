//! # Event listeners for the bus.
//!
//! This module provides the [`Listen`] trait, the shared handle type
//! [`ListenerRef`], and the closure adapter [`ListenerFn`].
//!
//! ## Architecture
//! ```text
//! Dispatch flow:
//!   trigger(names, args) ──► EventBus ──► per-name registration snapshot
//!                                             │
//!                                             ├──► Listen::call(args)
//!                                             │         │
//!                                             │    ┌────┴──────┬───────────┐
//!                                             │    ▼           ▼           ▼
//!                                             │  ListenerFn  LogListener  Custom
//!                                             │
//!                                             └──► Result forwarded to the caller
//! ```
//!
//! ## Implementing custom listeners
//! ```no_run
//! use signalbus::{Listen, ListenerError};
//! use async_trait::async_trait;
//!
//! struct CacheInvalidator;
//!
//! #[async_trait]
//! impl Listen<String> for CacheInvalidator {
//!     async fn call(&self, key: String) -> Result<(), ListenerError> {
//!         // drop the cached entry for `key`...
//!         let _ = key;
//!         Ok(())
//!     }
//! }
//! ```

mod listener;
mod listener_fn;

#[cfg(feature = "logging")]
mod log;

pub use listener::{Listen, ListenerRef};
pub use listener_fn::ListenerFn;

#[cfg(feature = "logging")]
pub use log::LogListener;
