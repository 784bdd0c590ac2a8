//! # Bus core: registration table, configuration, and dispatch.
//!
//! ## Contents
//! - [`EventBus`] the public dispatch surface (`on`/`off`/`once`/`trigger`/`trigger_then`)
//! - [`BusConfig`] per-instance settings
//! - `Registry` (crate-private) the ordered name → registrations table
//!
//! The registry is the only shared mutable state; it lives behind a mutex
//! inside the bus and is mutated exclusively through the `EventBus` methods.

mod bus;
mod config;
mod registry;

pub use bus::EventBus;
pub use config::BusConfig;
